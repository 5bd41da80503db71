//! # Error Types
//!
//! Three failure families exist in the core:
//!
//! - [`AddressError`]: a caller asked for an address (or range) outside the
//!   64KB space. Always a programming error, always fatal to the call.
//! - [`HookFault`]: a host hook failed while servicing an access. The address
//!   space reports it with the address and hook kind attached.
//! - [`ExecutionFault`]: the CPU could not complete an instruction. Fatal to
//!   the run; carries the instruction address and opcode for diagnostics.
//!
//! [`MemoryError`] joins the first two for bulk and range-checked accessors.
//! Illegal opcodes are not errors. See [`IllegalOpcode`].

use crate::hooks::HookKind;
use thiserror::Error;

/// An address or address range fell outside 0x0000-0xFFFF.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressError {
    /// A single address outside the 16-bit space.
    #[error("address 0x{address:X} is outside the 64KB address space")]
    OutOfRange {
        /// The offending address
        address: u32,
    },

    /// A bulk access starting at `start` would run past 0xFFFF.
    #[error("access of {len} bytes at ${start:04X} runs past the end of the address space")]
    RangeOverflow {
        /// First address of the access
        start: u16,
        /// Number of bytes requested
        len: usize,
    },

    /// A half-open range `[start, end)` that contains no addresses.
    #[error("address range 0x{start:X}..0x{end:X} is empty")]
    EmptyRange {
        /// Range start (inclusive)
        start: u32,
        /// Range end (exclusive)
        end: u32,
    },
}

impl AddressError {
    /// Checks that `address` is a valid 16-bit address.
    ///
    /// ```
    /// use beeb6502::AddressError;
    ///
    /// assert_eq!(AddressError::check(0xFFFF), Ok(0xFFFF));
    /// assert!(AddressError::check(0x10000).is_err());
    /// ```
    pub fn check(address: u32) -> Result<u16, AddressError> {
        u16::try_from(address).map_err(|_| AddressError::OutOfRange { address })
    }
}

/// Failure reported by a hook callback.
#[derive(Debug, Error)]
pub enum HookError {
    /// Free-form failure description.
    #[error("{0}")]
    Message(String),

    /// Host I/O failed (filesystem or terminal hooks).
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Any other error type raised by host code.
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),

    /// The hook asked for an address outside the 64KB space.
    #[error(transparent)]
    Address(#[from] AddressError),

    /// An access made from inside the hook failed in another hook.
    #[error(transparent)]
    Nested(Box<HookFault>),
}

impl HookError {
    /// Builds a [`HookError::Message`].
    pub fn msg(message: impl Into<String>) -> Self {
        HookError::Message(message.into())
    }
}

impl From<HookFault> for HookError {
    fn from(fault: HookFault) -> Self {
        HookError::Nested(Box::new(fault))
    }
}

impl From<MemoryError> for HookError {
    fn from(error: MemoryError) -> Self {
        match error {
            MemoryError::Address(e) => HookError::Address(e),
            MemoryError::Hook(fault) => fault.into(),
        }
    }
}

/// A hook failed while servicing an access at `address`.
#[derive(Debug, Error)]
#[error("{kind} hook at ${address:04X} failed: {source}")]
pub struct HookFault {
    /// Address whose access triggered the hook
    pub address: u16,
    /// Which hook kind was running
    pub kind: HookKind,
    /// What the hook reported
    #[source]
    pub source: HookError,
}

/// Failure of a range-checked, hooked memory access.
#[derive(Debug, Error)]
pub enum MemoryError {
    #[error(transparent)]
    Address(#[from] AddressError),

    #[error(transparent)]
    Hook(#[from] HookFault),
}

/// Fatal failure of CPU execution.
///
/// When `step()` returns one of these, the register file and cycle counter
/// are exactly as they were before the step began.
#[derive(Debug, Error)]
pub enum ExecutionFault {
    /// A hook failed during fetch or execution of the instruction at `pc`.
    #[error("execution fault at ${pc:04X} (opcode ${opcode:02X}): {fault}")]
    Hook {
        /// Address of the instruction being executed
        pc: u16,
        /// Opcode byte stored at `pc`
        opcode: u8,
        /// The underlying hook failure
        #[source]
        fault: HookFault,
    },

    /// A host-initiated subroutine call stopped before it returned.
    #[error("call to ${address:04X} stopped at ${pc:04X} before returning")]
    CallAborted {
        /// Entry point that was called
        address: u16,
        /// Program counter when execution stopped
        pc: u16,
    },
}

/// Diagnostic record for an illegal or unimplemented opcode.
///
/// The CPU executes these as a no-op and carries on; this record is handed to
/// the optional diagnostic callback installed with
/// [`CPU::on_illegal_opcode`](crate::CPU::on_illegal_opcode).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IllegalOpcode {
    /// Address of the opcode
    pub pc: u16,
    /// The opcode byte
    pub opcode: u8,
    /// Bytes consumed (1 unless the opcode's length is known)
    pub size_bytes: u8,
}
