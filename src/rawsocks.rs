use std::os::fd::OwnedFd;

use crate::error::AttackError;
use crate::injector::{FrameInjector, InjectError};

#[cfg(target_os = "linux")]
pub use linux_impl::open_socket_tx;

/// Injector writing to an `AF_PACKET` raw socket bound to one interface.
///
/// The interface must already be in monitor mode on the wanted channel.
/// The socket is closed when the injector is dropped.
#[derive(Debug)]
pub struct RawSocketInjector {
    socket: OwnedFd,
}

#[cfg(target_os = "linux")]
impl RawSocketInjector {
    pub fn open(interface: &str) -> Result<Self, AttackError> {
        let open_error = |reason: String| AttackError::InjectorOpen {
            interface: interface.to_string(),
            reason,
        };

        let ifindex = nix::net::if_::if_nametoindex(interface)
            .map_err(|e| open_error(format!("Interface not found ({})", e)))?;
        let socket = open_socket_tx(ifindex as i32).map_err(open_error)?;

        Ok(RawSocketInjector { socket })
    }
}

#[cfg(not(target_os = "linux"))]
impl RawSocketInjector {
    pub fn open(interface: &str) -> Result<Self, AttackError> {
        Err(AttackError::InjectorOpen {
            interface: interface.to_string(),
            reason: "Raw packet sockets are only supported on Linux".to_string(),
        })
    }
}

impl FrameInjector for RawSocketInjector {
    fn inject(&mut self, frame: &[u8]) -> Result<(), InjectError> {
        write_packet(&self.socket, frame)
    }
}

fn write_packet(fd: &OwnedFd, packet: &[u8]) -> Result<(), InjectError> {
    use std::os::fd::AsRawFd;

    let bytes_written = unsafe {
        libc::write(
            fd.as_raw_fd(),
            packet.as_ptr() as *const libc::c_void,
            packet.len(),
        )
    };

    if bytes_written < 0 {
        return Err(InjectError::from_io(std::io::Error::last_os_error()));
    }

    let written = bytes_written as usize;
    if written != packet.len() {
        return Err(InjectError::ShortWrite {
            written,
            expected: packet.len(),
        });
    }

    Ok(())
}

#[cfg(target_os = "linux")]
mod linux_impl {
    use std::{
        io, mem,
        os::fd::{AsRawFd, OwnedFd},
    };

    use libc::{sockaddr_ll, ETH_ALEN, ETH_P_ALL, SOL_PACKET, SO_PRIORITY};
    use nix::{
        fcntl::{fcntl, FcntlArg, OFlag},
        sys::socket::{socket, AddressFamily, SockFlag, SockProtocol, SockType},
    };

    /// Open a non-blocking raw socket for sending on the interface with the given index.
    pub fn open_socket_tx(ifindex: i32) -> Result<OwnedFd, String> {
        let mut saddr: sockaddr_ll = unsafe { mem::zeroed() };
        let prioval = 20;

        let fd_socket_tx = socket(
            AddressFamily::Packet,
            SockType::Raw,
            SockFlag::SOCK_CLOEXEC,
            SockProtocol::EthAll,
        )
        .map_err(|e| format!("Socket creation failed: {}", e))?;

        // Best effort, a failed priority does not prevent sending.
        unsafe {
            libc::setsockopt(
                fd_socket_tx.as_raw_fd(),
                SOL_PACKET,
                SO_PRIORITY,
                &prioval as *const _ as *const libc::c_void,
                mem::size_of::<i32>() as libc::socklen_t,
            )
        };

        saddr.sll_family = libc::AF_PACKET as u16;
        saddr.sll_protocol = (ETH_P_ALL as u16).to_be();
        saddr.sll_ifindex = ifindex;
        saddr.sll_halen = ETH_ALEN as u8;

        let bind_ret = unsafe {
            libc::bind(
                fd_socket_tx.as_raw_fd(),
                (&saddr as *const libc::sockaddr_ll).cast(),
                mem::size_of::<libc::sockaddr_ll>() as libc::socklen_t,
            )
        };

        if bind_ret < 0 {
            let error = io::Error::last_os_error();
            return Err(format!("Bind failed: {}", error));
        }

        let socket_tx_flags =
            fcntl(fd_socket_tx.as_raw_fd(), FcntlArg::F_GETFL).map_err(|e| e.to_string())?;

        let new_flags = OFlag::from_bits_truncate(socket_tx_flags | OFlag::O_NONBLOCK.bits());
        fcntl(fd_socket_tx.as_raw_fd(), FcntlArg::F_SETFL(new_flags)).map_err(|e| e.to_string())?;

        Ok(fd_socket_tx)
    }
}
