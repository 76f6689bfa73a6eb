//! peerpacket CLI
//!
//! Command-line interface for building, decoding and inspecting wire text.

use std::io;

use clap::{Parser, Subcommand};
use peerpacket::config::{CodecConfig, WireDialect};
use peerpacket::{shorten_id, Command, Packet, PacketCodec, Payload};
use tracing_subscriber::{fmt, EnvFilter};
use uuid::Uuid;

/// peerpacket CLI
#[derive(Parser, Debug)]
#[command(name = "peerpacket-cli")]
#[command(about = "Encode, decode and inspect peer packet wire text")]
#[command(version)]
struct Args {
    /// Use the strict (escaped, tokenized) dialect instead of compat
    #[arg(short, long, global = true)]
    strict: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Build a packet and print its wire text
    Encode {
        /// Command tag, e.g. "chat;text;"
        #[arg(short, long, default_value = peerpacket::protocol::SIMPLE_TEXT)]
        command: String,

        /// Author id (omit for an anonymous packet)
        #[arg(short, long)]
        author: Option<Uuid>,

        /// Payload; numeric text becomes a number
        data: String,
    },

    /// Decode wire text (argument, or one packet per line on stdin)
    Decode {
        /// Print the long form with full ids and payload
        #[arg(short, long)]
        long: bool,

        /// Wire text to decode
        wire: Option<String>,
    },

    /// Print the shortened form of an id
    Shorten {
        /// The id to shorten
        id: Uuid,
    },

    /// Print the message type of a command tag
    Type {
        /// The command tag
        tag: String,
    },
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,peerpacket=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let dialect = if args.strict {
        WireDialect::Strict
    } else {
        WireDialect::Compat
    };
    let codec = match PacketCodec::new(CodecConfig::builder().dialect(dialect).build()) {
        Ok(c) => c,
        Err(e) => {
            tracing::error!("Invalid codec configuration: {}", e);
            std::process::exit(1);
        }
    };

    match args.command {
        Commands::Encode {
            command,
            author,
            data,
        } => {
            let packet = Packet::new(command, Payload::from_wire(&data), author);
            tracing::debug!("Built {}", packet);
            println!("{}", codec.encode(&packet));
        }
        Commands::Decode { long, wire } => {
            if !decode(&codec, wire, long) {
                std::process::exit(1);
            }
        }
        Commands::Shorten { id } => println!("{}", shorten_id(Some(id))),
        Commands::Type { tag } => println!("{}", Command::new(tag).message_type()),
    }
}

/// Decode one argument or every stdin line; false if anything failed
fn decode(codec: &PacketCodec, wire: Option<String>, long: bool) -> bool {
    let show = |packet: &Packet| {
        if long {
            println!("{}", packet.to_long_string());
        } else {
            println!("{}", packet);
        }
    };

    if let Some(text) = wire {
        return match codec.decode(&text) {
            Ok(packet) => {
                show(&packet);
                true
            }
            Err(e) => {
                tracing::error!("Failed to decode: {}", e);
                false
            }
        };
    }

    let mut ok = true;
    let mut stdin = io::stdin().lock();
    loop {
        match codec.read_packet(&mut stdin) {
            Ok(Some(packet)) => show(&packet),
            Ok(None) => break,
            Err(peerpacket::PacketError::Io(e)) => {
                tracing::error!("Failed to read stdin: {}", e);
                return false;
            }
            // the codec has already consumed the bad line
            Err(e) => {
                tracing::error!("Skipping line: {}", e);
                ok = false;
            }
        }
    }
    ok
}
