// SPDX-License-Identifier: MIT OR Apache-2.0
// SPDX-FileCopyrightText: 2025 swdbridge contributors

pub mod bits;
pub mod config;
pub mod diagnostics;
pub mod driver;
pub mod error;
pub mod transport;

pub use crate::bits::{BitSequence, ShiftOrder, Word};
pub use crate::config::DriverConfig;
pub use crate::driver::SwdDriver;
pub use crate::error::{SwdError, TransportError};
pub use crate::transport::{Direction, SwdTransport};
