//! Interactive line client for the venue server.
//!
//! Reads CSV commands from stdin, forwards them to the server, and
//! prints whatever event lines come back shortly after.

use std::env;
use std::io::{self, Write};
use std::time::Duration;

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tokio::time::timeout;
use venue_protocol::csv_codec::parse_input_line;

#[tokio::main]
async fn main() -> Result<()> {
    // Where to connect: env override or default.
    let addr = env::var("VENUE_CLIENT_ADDR").unwrap_or_else(|_| "127.0.0.1:9000".to_string());

    println!("Connecting to {}...", addr);
    let stream = TcpStream::connect(&addr).await?;
    println!("Connected.");
    println!("Type CSV commands like:");
    println!("  N, 1, AAPL, 100, 10, S");
    println!("  N, 2, AAPL, 100, 4, B");
    println!("  C, 1");
    println!("Type 'quit' or 'exit' to leave.\n");

    let (read_half, mut write_half) = stream.into_split();
    let mut server_lines = BufReader::new(read_half).lines();

    let stdin = io::stdin();

    loop {
        // Prompt
        print!(">> ");
        io::stdout().flush()?;

        let mut line = String::new();
        let n = stdin.read_line(&mut line)?;
        if n == 0 {
            println!("\nEOF on stdin, exiting client.");
            break;
        }

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if trimmed.eq_ignore_ascii_case("quit") || trimmed.eq_ignore_ascii_case("exit") {
            println!("Exiting client.");
            break;
        }

        // Validate locally before sending so typos get caught here.
        if parse_input_line(trimmed).is_none() {
            eprintln!("Could not parse line as a command. Check CSV format.");
            continue;
        }

        write_half.write_all(trimmed.as_bytes()).await?;
        write_half.write_all(b"\n").await?;

        // Read back responses until a short quiet period.
        loop {
            match timeout(Duration::from_millis(100), server_lines.next_line()).await {
                Ok(Ok(Some(event_line))) => println!("<< {}", event_line),
                Ok(Ok(None)) => {
                    println!("Server closed the connection.");
                    return Ok(());
                }
                Ok(Err(e)) => {
                    eprintln!("Read error: {:?}", e);
                    return Ok(());
                }
                Err(_) => break,
            }
        }
    }

    Ok(())
}
