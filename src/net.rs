use std::io;
use std::net::{IpAddr, Ipv4Addr, UdpSocket};
use tracing::warn;

// Never actually reached: connecting a UDP socket sends nothing, it only
// makes the OS pick the outbound interface.
const PROBE_TARGET: (&str, u16) = ("10.255.255.255", 1);

/// Address other devices on the LAN can reach this machine on.
///
/// Falls back to `127.0.0.1` if the probe socket fails for any reason.
pub fn local_ip() -> IpAddr {
    local_ip_with(probe_outbound_interface)
}

pub fn local_ip_with<F>(probe: F) -> IpAddr
where
    F: FnOnce() -> io::Result<IpAddr>,
{
    match probe() {
        Ok(ip) => ip,
        Err(e) => {
            warn!("Local IP discovery failed, using loopback: {}", e);
            IpAddr::V4(Ipv4Addr::LOCALHOST)
        }
    }
}

fn probe_outbound_interface() -> io::Result<IpAddr> {
    let socket = UdpSocket::bind((Ipv4Addr::UNSPECIFIED, 0))?;
    socket.connect(PROBE_TARGET)?;
    Ok(socket.local_addr()?.ip())
}

pub fn access_url(ip: IpAddr, port: u16) -> String {
    format!("http://{}:{}", ip, port)
}
