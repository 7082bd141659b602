// SPDX-License-Identifier: MIT OR Apache-2.0
// SPDX-FileCopyrightText: 2025 swdbridge contributors
//! Threshold gated diagnostic output for driver operations.
//!
//! The SWD layer can run at a different verbosity to the tool hosting it, so each driver carries
//! its own threshold rather than relying solely on the global `log` max level.

use std::fmt::Arguments;

use log::{Level, LevelFilter};

/// Something that accepts already formatted diagnostic messages
pub trait DiagnosticSink
{
	fn emit(&self, level: Level, message: &str);
}

/// Forwards diagnostics to the `log` facade
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl DiagnosticSink for LogSink
{
	fn emit(&self, level: Level, message: &str)
	{
		log::log!(target: "swdbridge", level, "{}", message);
	}
}

pub struct Diagnostics
{
	threshold: LevelFilter,
	sink: Box<dyn DiagnosticSink>,
}

impl Diagnostics
{
	pub fn new(threshold: LevelFilter) -> Self
	{
		Self::with_sink(threshold, Box::new(LogSink))
	}

	pub fn with_sink(threshold: LevelFilter, sink: Box<dyn DiagnosticSink>) -> Self
	{
		Self {
			threshold,
			sink,
		}
	}

	pub fn threshold(&self) -> LevelFilter
	{
		self.threshold
	}

	pub fn set_threshold(&mut self, threshold: LevelFilter)
	{
		self.threshold = threshold;
	}

	pub fn enabled(&self, level: Level) -> bool
	{
		level <= self.threshold
	}

	/// Emit a message at `level`. Below the threshold this does nothing, not even formatting.
	pub fn log(&self, level: Level, args: Arguments<'_>)
	{
		if !self.enabled(level) {
			return;
		}
		self.sink.emit(level, &args.to_string());
	}
}

#[macro_export]
macro_rules! diagnostic
{
	($diagnostics:expr, $level:expr, $($arg:tt)+) => {
		$diagnostics.log($level, format_args!($($arg)+))
	};
}
