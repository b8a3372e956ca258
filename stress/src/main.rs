use log::{info, warn};
use std::sync::Arc;
use std::thread;
use std::time::Instant;
use boundbuf::{Channel, ChannelConfig, Received, SPECIAL_MESSAGE};

const CAPACITY: usize = 64 * 1024; // 64 KB
const PRODUCERS: usize = 4;
const CONSUMERS: usize = 4;
const MESSAGES_PER_PRODUCER: usize = 100_000;
const MAX_MESSAGE_SIZE: usize = 512;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = ChannelConfig::new().with_capacity(CAPACITY);
    let channel = match Channel::with_config(&config) {
        Ok(channel) => Arc::new(channel),
        Err(err) => {
            warn!("Failed to create channel: {}", err);
            return;
        }
    };
    info!(
        "Channel ready: capacity={} bytes, {} producers, {} consumers",
        channel.capacity(),
        PRODUCERS,
        CONSUMERS
    );

    let start = Instant::now();

    let producers: Vec<_> = (0..PRODUCERS)
        .map(|id| {
            let channel = Arc::clone(&channel);
            thread::spawn(move || produce(&channel, id))
        })
        .collect();

    let consumers: Vec<_> = (0..CONSUMERS)
        .map(|id| {
            let channel = Arc::clone(&channel);
            thread::spawn(move || consume(&channel, id))
        })
        .collect();

    let mut sent = 0u64;
    for handle in producers {
        sent += handle.join().unwrap_or(0);
    }

    // One special message per consumer tells it to stop.
    for _ in 0..CONSUMERS {
        if let Err(err) = channel.send(SPECIAL_MESSAGE) {
            warn!("Failed to send stop message: {}", err);
        }
    }

    let mut received = 0u64;
    for handle in consumers {
        received += handle.join().unwrap_or(0);
    }
    let elapsed = start.elapsed();
    let speed = (received as f64 / 1024.0 / 1024.0) / elapsed.as_secs_f64();

    let stats = channel.stats();
    info!("=== Stress Complete ===");
    info!("Messages: {} sent, {} received", stats.messages_sent, stats.messages_received);
    info!("Bytes: {} sent, {} received", sent, received);
    info!("Waits: {}", stats.waits);
    info!("Time: {:.2} seconds", elapsed.as_secs_f64());
    info!("Speed: {:.2} MB/s", speed);

    if let Err(err) = channel.close() {
        warn!("Close failed: {}", err);
    }
    match Arc::try_unwrap(channel) {
        Ok(channel) => {
            if let Err(err) = channel.destroy() {
                warn!("Destroy failed: {}", err);
            }
        }
        Err(_) => warn!("Channel still shared, skipping destroy"),
    }
}

fn produce(channel: &Channel, id: usize) -> u64 {
    let mut sent = 0u64;
    for i in 0..MESSAGES_PER_PRODUCER {
        let size = (i * 31 + id * 17) % MAX_MESSAGE_SIZE + 1;
        let message = vec![0xAB; size];
        match channel.send(&message) {
            Ok(()) => sent += size as u64,
            Err(err) => {
                warn!("Producer {} stopped: {}", id, err);
                break;
            }
        }
    }
    info!("Producer {} done: {} bytes", id, sent);
    sent
}

fn consume(channel: &Channel, id: usize) -> u64 {
    let mut received = 0u64;
    loop {
        match channel.receive() {
            Ok(Received::Message(bytes)) => received += bytes.len() as u64,
            Ok(Received::Special(_)) => break,
            Err(err) => {
                warn!("Consumer {} stopped: {}", id, err);
                break;
            }
        }
    }
    info!("Consumer {} done: {} bytes", id, received);
    received
}
