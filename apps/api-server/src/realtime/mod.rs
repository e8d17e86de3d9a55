//! Realtime fan-out over socket.io.
//!
//! Feed subscribers connect to a dedicated socket.io listener and receive
//! every committed mutation as a `posts` event (`{action, post}`). The
//! listener is read-only: clients subscribe by connecting, unsubscribe by
//! disconnecting, and no authentication is required.

use std::sync::Arc;

use socketioxide::{SocketIo, extract::SocketRef};
use tokio::sync::broadcast;

use ripple_infra::InMemoryFeedBroadcaster;

/// Configure the socket.io namespace used by feed subscribers.
fn configure_socket_handlers(io: &SocketIo) {
    io.ns("/", |socket: SocketRef| async move {
        tracing::info!(socket_id = %socket.id, "Client connected");

        socket.on_disconnect(|socket: SocketRef| async move {
            tracing::info!(socket_id = %socket.id, "Client disconnected");
        });
    });
}

/// Forward broadcaster events to every connected socket.
fn spawn_forwarder(io: SocketIo, broadcaster: Arc<InMemoryFeedBroadcaster>) {
    let mut events = broadcaster.subscribe();

    tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(event) => {
                    io.emit("posts", &event).ok();
                }
                Err(broadcast::error::RecvError::Lagged(count)) => {
                    // Dropped events are not replayed.
                    tracing::warn!(lagged = count, "realtime forwarder lagged behind");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!("feed broadcaster closed, stopping forwarder");
                    break;
                }
            }
        }
    });
}

/// Serve the socket.io endpoint on its own port.
pub async fn serve(port: u16, broadcaster: Arc<InMemoryFeedBroadcaster>) -> std::io::Result<()> {
    let (layer, io) = SocketIo::new_layer();
    configure_socket_handlers(&io);
    spawn_forwarder(io, broadcaster);

    let app = axum::Router::new().layer(layer);
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    tracing::info!(port, "Realtime socket.io listener started");

    axum::serve(listener, app).await
}
