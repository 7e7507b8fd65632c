// ── Multicast-DNS discovery ──
//
// Browses `_http._tcp` advertisements, filters to the device's
// instance name, and forwards resolution/loss as presence events. The
// daemon and browse subscription are long-lived cancelable resources:
// stopping the handle releases the multicast socket.

use std::net::{IpAddr, Ipv4Addr};

use mdns_sd::{ServiceDaemon, ServiceEvent};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::error::CoreError;
use crate::model::DEVICE_NAME;

/// Service type the device firmware registers under.
pub const SERVICE_TYPE: &str = "_http._tcp.local.";

/// Buffered events between the mDNS receiver task and the consumer.
const EVENT_CHANNEL_SIZE: usize = 16;

/// One presence transition observed on the local network segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresenceEvent {
    /// The advertised instance name (full service name).
    pub service_name: String,
    /// `true` when the advertisement disappeared.
    pub lost: bool,
    /// Resolved IPv4 address, present only on resolution events that
    /// carried one.
    pub ipv4: Option<Ipv4Addr>,
}

/// Handle over a running browse. Stopping it (explicitly or on drop)
/// halts event delivery and shuts the multicast listener down.
pub struct DiscoveryHandle {
    daemon: ServiceDaemon,
    service_type: String,
    cancel: CancellationToken,
}

impl DiscoveryHandle {
    /// Stop browsing and release the multicast socket.
    pub fn stop(&self) {
        self.cancel.cancel();
        if let Err(err) = self.daemon.stop_browse(&self.service_type) {
            debug!(%err, "stop_browse failed");
        }
        if let Err(err) = self.daemon.shutdown() {
            debug!(%err, "mdns daemon shutdown failed");
        }
    }
}

impl Drop for DiscoveryHandle {
    fn drop(&mut self) {
        self.stop();
    }
}

/// mDNS browse/resolve wrapper emitting [`PresenceEvent`]s.
pub struct DiscoveryService;

impl DiscoveryService {
    /// Start browsing for the device.
    ///
    /// Returns the control handle and the event stream. Only services
    /// whose advertised name contains [`DEVICE_NAME`] surface as
    /// events; everything else on the segment is ignored.
    pub fn start() -> Result<(DiscoveryHandle, mpsc::Receiver<PresenceEvent>), CoreError> {
        Self::start_filtered(SERVICE_TYPE, DEVICE_NAME)
    }

    /// Start browsing with an explicit service type and name filter.
    pub fn start_filtered(
        service_type: &str,
        name_filter: &str,
    ) -> Result<(DiscoveryHandle, mpsc::Receiver<PresenceEvent>), CoreError> {
        let daemon = ServiceDaemon::new().map_err(|e| CoreError::DiscoveryUnavailable {
            reason: e.to_string(),
        })?;
        let browse = daemon
            .browse(service_type)
            .map_err(|e| CoreError::DiscoveryUnavailable {
                reason: e.to_string(),
            })?;
        info!(service_type, "mDNS browse started");

        let (tx, rx) = mpsc::channel(EVENT_CHANNEL_SIZE);
        let cancel = CancellationToken::new();
        let task_cancel = cancel.clone();
        let filter = name_filter.to_owned();

        tokio::spawn(async move {
            loop {
                tokio::select! {
                    () = task_cancel.cancelled() => break,
                    event = browse.recv_async() => {
                        let Ok(event) = event else {
                            // Daemon shut down; browse channel closed.
                            break;
                        };
                        if let Some(presence) = map_event(event, &filter) {
                            if tx.send(presence).await.is_err() {
                                // Consumer gone; nothing left to do.
                                break;
                            }
                        }
                    }
                }
            }
            debug!("mDNS forwarding task finished");
        });

        Ok((
            DiscoveryHandle {
                daemon,
                service_type: service_type.to_owned(),
                cancel,
            },
            rx,
        ))
    }
}

/// Map one raw browse event to a presence event, applying the name
/// filter. Non-matching services and bookkeeping events yield nothing.
fn map_event(event: ServiceEvent, name_filter: &str) -> Option<PresenceEvent> {
    match event {
        ServiceEvent::ServiceResolved(info) => {
            let service_name = info.get_fullname().to_owned();
            if !service_name.contains(name_filter) {
                return None;
            }
            let ipv4 = info.get_addresses().iter().find_map(|addr| match addr {
                IpAddr::V4(v4) => Some(*v4),
                IpAddr::V6(_) => None,
            });
            if ipv4.is_none() {
                warn!(%service_name, "service resolved without an IPv4 address");
            }
            Some(PresenceEvent {
                service_name,
                lost: false,
                ipv4,
            })
        }
        ServiceEvent::ServiceRemoved(_, fullname) => {
            if !fullname.contains(name_filter) {
                return None;
            }
            Some(PresenceEvent {
                service_name: fullname,
                lost: true,
                ipv4: None,
            })
        }
        other => {
            debug!(?other, "ignoring browse event");
            None
        }
    }
}
