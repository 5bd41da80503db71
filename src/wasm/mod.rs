//! WebAssembly bindings for beeb6502.
//!
//! Exposes the CPU and its address space to JavaScript so programs can be
//! loaded, stepped and inspected from a browser.

#[cfg(feature = "wasm")]
pub mod api;

#[cfg(feature = "wasm")]
pub use api::Emulator6502;
