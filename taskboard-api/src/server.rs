/// HTTP server lifecycle
///
/// [`serve`] runs the router until a [`CancellationToken`] fires, then stops
/// accepting connections and gives in-flight requests a bounded grace period.
/// Requests still running when it elapses are dropped mid-flight and answered
/// with `503 Service Unavailable`. [`shutdown_signal`] resolves on Ctrl+C or
/// SIGTERM.

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::{IntoResponse, Response},
    Router,
};
use std::future::IntoFuture;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

/// How long connections get to flush their 503s once handlers are cut off
const CUT_OFF_FLUSH: Duration = Duration::from_secs(1);

/// Serves `app` on `listener` until `shutdown` is cancelled
///
/// Returns once every connection has closed, or at most `grace` plus a short
/// flush window after `shutdown` fires.
///
/// # Errors
///
/// Returns an error if the server fails while accepting connections.
pub async fn serve(
    listener: TcpListener,
    app: Router,
    shutdown: CancellationToken,
    grace: Duration,
) -> anyhow::Result<()> {
    let cut_off = CancellationToken::new();
    let app = app.layer(middleware::from_fn_with_state(
        cut_off.clone(),
        cancel_on_cut_off,
    ));

    let drain = shutdown.clone();
    let mut server = tokio::spawn(
        axum::serve(listener, app)
            .with_graceful_shutdown(async move { drain.cancelled().await })
            .into_future(),
    );

    tokio::select! {
        result = &mut server => {
            result??;
            return Ok(());
        }
        _ = shutdown.cancelled() => {}
    }

    tracing::info!(grace_seconds = grace.as_secs_f64(), "Draining in-flight requests");

    if let Ok(result) = tokio::time::timeout(grace, &mut server).await {
        result??;
        return Ok(());
    }

    tracing::warn!("Grace period elapsed, cancelling in-flight requests");
    cut_off.cancel();

    match tokio::time::timeout(CUT_OFF_FLUSH, &mut server).await {
        Ok(result) => result??,
        Err(_) => {
            tracing::warn!("Connections still open after cut-off, abandoning them");
            server.abort();
        }
    }

    Ok(())
}

/// Races the request against the cut-off token, dropping the handler if the
/// token fires first
async fn cancel_on_cut_off(
    State(cut_off): State<CancellationToken>,
    request: Request,
    next: Next,
) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();

    tokio::select! {
        response = next.run(request) => response,
        _ = cut_off.cancelled() => {
            tracing::warn!(%method, %uri, "Request cancelled at shutdown");
            StatusCode::SERVICE_UNAVAILABLE.into_response()
        }
    }
}

/// Resolves once the process receives Ctrl+C or SIGTERM
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("Received Ctrl+C, shutting down"),
        () = terminate => tracing::info!("Received SIGTERM, shutting down"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::routing::get;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    async fn bind() -> (TcpListener, std::net::SocketAddr) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        (listener, addr)
    }

    #[tokio::test]
    async fn test_serves_until_cancelled() {
        let (listener, addr) = bind().await;
        let app = Router::new().route("/ping", get(|| async { "pong" }));
        let token = CancellationToken::new();

        let handle = tokio::spawn(serve(listener, app, token.clone(), Duration::from_secs(1)));

        let mut stream = tokio::net::TcpStream::connect(addr).await.unwrap();
        stream
            .write_all(b"GET /ping HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n")
            .await
            .unwrap();
        let mut response = String::new();
        stream.read_to_string(&mut response).await.unwrap();
        assert!(response.starts_with("HTTP/1.1 200"));
        assert!(response.ends_with("pong"));

        token.cancel();
        let result = tokio::time::timeout(Duration::from_secs(5), handle)
            .await
            .expect("server did not stop")
            .unwrap();
        assert!(result.is_ok());
    }

    async fn send(addr: std::net::SocketAddr, path: &str) -> tokio::net::TcpStream {
        let mut stream = tokio::net::TcpStream::connect(addr).await.unwrap();
        let request = format!("GET {} HTTP/1.1\r\nHost: localhost\r\n\r\n", path);
        stream.write_all(request.as_bytes()).await.unwrap();
        stream
    }

    async fn read_all(stream: &mut tokio::net::TcpStream) -> String {
        let mut response = String::new();
        tokio::time::timeout(Duration::from_secs(5), stream.read_to_string(&mut response))
            .await
            .expect("connection was not closed")
            .unwrap();
        response
    }

    fn flagging_app(delay: Duration, finished: Arc<AtomicBool>) -> Router {
        Router::new().route(
            "/slow",
            get(move || {
                let finished = finished.clone();
                async move {
                    tokio::time::sleep(delay).await;
                    finished.store(true, Ordering::SeqCst);
                    "done"
                }
            }),
        )
    }

    #[tokio::test]
    async fn test_requests_finishing_within_grace_complete() {
        let (listener, addr) = bind().await;
        let finished = Arc::new(AtomicBool::new(false));
        let app = flagging_app(Duration::from_millis(200), finished.clone());
        let token = CancellationToken::new();

        let handle = tokio::spawn(serve(listener, app, token.clone(), Duration::from_secs(3)));

        let mut stream = send(addr, "/slow").await;
        tokio::time::sleep(Duration::from_millis(50)).await;
        token.cancel();

        let response = read_all(&mut stream).await;
        assert!(response.starts_with("HTTP/1.1 200"), "{}", response);
        assert!(response.ends_with("done"));
        assert!(finished.load(Ordering::SeqCst));

        let result = tokio::time::timeout(Duration::from_secs(5), handle)
            .await
            .expect("server did not stop")
            .unwrap();
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_slow_requests_are_cut_off_after_grace() {
        let (listener, addr) = bind().await;
        let finished = Arc::new(AtomicBool::new(false));
        let app = flagging_app(Duration::from_millis(800), finished.clone());
        let token = CancellationToken::new();

        let handle = tokio::spawn(serve(
            listener,
            app,
            token.clone(),
            Duration::from_millis(100),
        ));

        let mut stream = send(addr, "/slow").await;
        tokio::time::sleep(Duration::from_millis(50)).await;
        token.cancel();

        let result = tokio::time::timeout(Duration::from_secs(5), handle)
            .await
            .expect("server ignored the grace period")
            .unwrap();
        assert!(result.is_ok());

        let response = read_all(&mut stream).await;
        assert!(response.starts_with("HTTP/1.1 503"), "{}", response);

        // Long enough for the handler to have finished had it kept running
        tokio::time::sleep(Duration::from_millis(1500)).await;
        assert!(!finished.load(Ordering::SeqCst));
    }
}
