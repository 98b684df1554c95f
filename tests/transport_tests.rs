use std::time::Duration;
use tokio::io::AsyncReadExt;
use tokio::net::TcpListener;
use url::Url;
use webhook_uploader::upload::{HttpTransport, TransferRequest, Transport, TransportError};

fn request() -> TransferRequest {
    TransferRequest {
        file_name: "a.csv".to_string(),
        file_type: "text/csv".to_string(),
        file_size: 4,
        bytes: b"a,b\n".to_vec(),
    }
}

#[tokio::test]
async fn closed_port_is_unreachable() {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let endpoint = Url::parse(&format!("http://127.0.0.1:{}/webhook-test/upload", port)).unwrap();
    let transport = HttpTransport::new(endpoint, Some(Duration::from_secs(5))).unwrap();

    let err = transport.send(request()).await.unwrap_err();
    assert!(matches!(err, TransportError::Unreachable { .. }), "{err:?}");
}

#[tokio::test]
async fn silent_server_times_out_as_request_failure() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    // Accepts and reads, but never answers.
    let server = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = [0u8; 1024];
        while let Ok(n) = socket.read(&mut buf).await {
            if n == 0 {
                break;
            }
        }
    });

    let endpoint = Url::parse(&format!("http://{}/webhook-test/upload", addr)).unwrap();
    let transport = HttpTransport::new(endpoint, Some(Duration::from_millis(300))).unwrap();

    let err = transport.send(request()).await.unwrap_err();
    assert!(matches!(err, TransportError::Request { .. }), "{err:?}");

    server.abort();
}
