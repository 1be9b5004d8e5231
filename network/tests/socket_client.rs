// SPDX-License-Identifier: MIT OR Apache-2.0

use anyhow::Result;
use gridmark_core::{CellIndex, Mark, Transport, WinLine};
use gridmark_network::{channel, Disconnect, NetworkConfig, ServerEvent, SocketClient};
use serde_json::json;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpListener;

fn config_for(addr: std::net::SocketAddr) -> NetworkConfig {
    NetworkConfig {
        server_addr: addr.to_string(),
        connect_timeout_secs: 2,
        max_line_bytes: 256,
    }
}

#[tokio::test]
async fn exchanges_json_lines() -> Result<()> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;

    let server = tokio::spawn(async move {
        let (stream, _) = listener.accept().await?;
        let (read_half, mut write_half) = stream.into_split();
        let mut lines = BufReader::new(read_half).lines();
        let received = lines.next_line().await?;

        let oversized = format!("{{\"event\":\"chat\",\"payload\":\"{}\"}}\n", "a".repeat(400));
        let script: [&[u8]; 5] = [
            b"{\"event\":\"board\",\"payload\":{\"board\":[[\"X\",\"\",\"\"],[\"\",\"\",\"\"],[\"\",\"\",\"\"]],\"gameOver\":false}}\n",
            b"this is not json\n",
            // invalid UTF-8 must not turn into a replacement-character mark
            b"{\"event\":\"board\",\"payload\":{\"board\":[[\"\xFF\"]],\"gameOver\":false}}\n",
            oversized.as_bytes(),
            b"{\"event\":\"turn-state\",\"payload\":{\"outcome\":\"X wins\",\"winIndxs\":[[0,0],[0,2]],\"gameOver\":true}}\n",
        ];
        for line in script {
            write_half.write_all(line).await?;
        }
        write_half.flush().await?;
        anyhow::Ok(received)
    });

    let client = SocketClient::connect(&config_for(addr)).await?;
    let (mut transport, outbound) = channel();
    transport.emit("turn", json!(4))?;

    let mut events = Vec::new();
    let disconnect = client.run(&outbound, |event| events.push(event)).await?;
    drop(transport);

    assert_eq!(disconnect, Disconnect::ServerClosed);
    assert_eq!(server.await??.as_deref(), Some(r#"{"event":"turn","payload":4}"#));

    assert_eq!(events.len(), 2);
    let ServerEvent::Board(update) = &events[0] else {
        panic!("expected board event, got {:?}", events[0]);
    };
    assert_eq!(update.board.get(CellIndex::new(0, 0)), Some(Mark::Player('X')));

    let ServerEvent::TurnState(turn) = &events[1] else {
        panic!("expected turn-state event, got {:?}", events[1]);
    };
    assert_eq!(turn.game_over, Some(true));
    assert_eq!(
        turn.win_line,
        Some(WinLine::new(CellIndex::new(0, 0), CellIndex::new(0, 2)))
    );
    Ok(())
}

#[tokio::test]
async fn dropping_transport_ends_run() -> Result<()> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;

    let server = tokio::spawn(async move {
        let (stream, _) = listener.accept().await?;
        // hold the connection open until the client goes away
        let mut lines = BufReader::new(stream).lines();
        while lines.next_line().await?.is_some() {}
        anyhow::Ok(())
    });

    let client = SocketClient::connect(&config_for(addr)).await?;
    let (transport, outbound) = channel();
    drop(transport);

    let disconnect = client.run(&outbound, |_| {}).await?;
    assert_eq!(disconnect, Disconnect::ClientClosed);

    server.abort();
    Ok(())
}

#[tokio::test]
async fn connect_failure_is_reported() -> Result<()> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    drop(listener);

    let err = match SocketClient::connect(&config_for(addr)).await {
        Ok(_) => panic!("connect to a closed port should fail"),
        Err(e) => e,
    };
    assert!(err.to_string().contains(&addr.to_string()));
    Ok(())
}
