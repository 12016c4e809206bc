//! Finds the DLL that a COFF import library resolves its imports to.
//!
//! ```no_run
//! let data = std::fs::read("kernel32.lib")?;
//! if let Some(dll) = dllname::importlib::find_dll_name(&data)? {
//!     println!("{dll}");
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod importlib;
pub mod libsearch;
