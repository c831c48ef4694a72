//! DNS-SD discovery walkthrough.
//!
//! Enumerates the host's IPv4 interfaces and, on each one, multicasts the
//! service enumeration question followed by a PTR query for one service
//! type, polling for replies between paced receive attempts.
//!
//! ```text
//! cargo run --package mdns --example discovery
//! cargo run --package mdns --example discovery -- --service _ipp._tcp.local. --attempts 5
//! ```

use std::thread::sleep;
use std::time::Duration;

use clap::Parser;
use mdns::{DnsType, Entry, Reply, RequestPerformer};

#[derive(Parser, Debug)]
#[command(name = "mDNS Discovery")]
#[command(about = "Discover DNS-SD services on the local link")]
struct Args {
    /// Service type to query after discovery
    #[arg(long, default_value = "_http._tcp.local.")]
    service: String,

    /// Receive attempts per phase and interface
    #[arg(long, default_value = "10")]
    attempts: u32,

    /// Pause between receive attempts, in milliseconds
    #[arg(long, default_value = "1000")]
    interval: u64,

    /// Only use this interface address (e.g. 192.168.1.4)
    #[arg(long)]
    interface: Option<String>,
}

fn print_entry(section: &str, entry: &Entry) {
    for record in &entry.ptr_records {
        println!("    {section} PTR {} (ttl {})", record.name, record.header.ttl);
    }
    for record in &entry.srv_records {
        println!(
            "    {section} SRV {}:{} prio {} weight {}",
            record.target, record.port, record.priority, record.weight
        );
    }
    for record in &entry.txt_records {
        for pair in &record.entries {
            println!("    {section} TXT {}={}", pair.key, pair.value);
        }
    }
    for record in &entry.a_records {
        println!("    {section} A {}", record.address);
    }
    for record in &entry.aaaa_records {
        println!("    {section} AAAA {}", record.address);
    }
}

fn print_reply(reply: &Reply) {
    if reply.is_empty() {
        return;
    }
    println!(
        "  reply from {}:{} with {} records",
        reply.from_address,
        reply.from_port,
        reply.record_count()
    );
    print_entry("answer", &reply.answer);
    print_entry("authority", &reply.authority);
    print_entry("additional", &reply.additional);
}

fn main() -> Result<(), shared::error::Error> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let interval = Duration::from_millis(args.interval);

    let mut performer = RequestPerformer::new()?;
    let interfaces = match args.interface {
        Some(interface) => vec![interface],
        None => performer.list_ipv4_interfaces(),
    };

    for interface in &interfaces {
        println!("checking interface {interface}");

        if let Err(err) = performer.discovery_send(interface) {
            log::warn!("discovery send on {interface} failed: {err}");
            continue;
        }
        println!("sent DNS-SD discovery, reading replies");
        for _ in 0..args.attempts {
            print_reply(&performer.discovery_recv(interface));
            sleep(interval);
        }

        if let Err(err) = performer.query_send(interface, DnsType::Ptr, &args.service) {
            log::warn!("query send on {interface} failed: {err}");
            continue;
        }
        println!("sent PTR query for {}, reading replies", args.service);
        for _ in 0..args.attempts {
            print_reply(&performer.query_recv(interface));
            sleep(interval);
        }
    }

    performer.close_all();
    Ok(())
}
