// SPDX-License-Identifier: MIT OR Apache-2.0
// SPDX-FileCopyrightText: 2025 swdbridge contributors

mod cli_commands;

use std::io::stdout;
use std::path::PathBuf;

use clap::builder::styling::Styles;
use clap::{ArgAction, Args, CommandFactory, Parser, crate_description, crate_version};
use clap_complete::{Shell, generate};
use color_eyre::config::HookBuilder;
use color_eyre::eyre::{EyreHandler, InstallError, Result};
use log::LevelFilter;
use owo_colors::OwoColorize;
use swdbridge::SwdError;

use crate::cli_commands::ToplevelCommands;

#[derive(Parser)]
#[command(
	version,
	about = format!("{} v{}", crate_description!(), crate_version!()),
	styles(style()),
	disable_colored_help(false),
	arg_required_else_help(true)
)]
struct CliArguments
{
	#[arg(global = true, short = 'c', long = "config")]
	/// Load the driver configuration from the given JSON file
	config: Option<PathBuf>,
	#[arg(global = true, short = 'v', long = "verbose", action = ArgAction::Count)]
	/// Increase logging verbosity (may be repeated)
	verbose: u8,

	#[command(subcommand)]
	pub subcommand: ToplevelCommands,
}

#[derive(Args)]
struct CompletionArguments
{
	shell: Shell,
}

type EyreHookFunc = Box<dyn Fn(&(dyn std::error::Error + 'static)) -> Box<dyn EyreHandler> + Send + Sync + 'static>;
type PanicHookFunc = Box<dyn Fn(&std::panic::PanicHookInfo<'_>) + Send + Sync + 'static>;

struct SwdbridgeHook
{
	inner_hook: EyreHookFunc,
}

struct SwdbridgePanic
{
	inner_hook: PanicHookFunc,
}

struct SwdbridgeHandler
{
	inner_handler: Box<dyn EyreHandler>,
}

impl SwdbridgeHook
{
	fn build_handler(&self, error: &(dyn std::error::Error + 'static)) -> SwdbridgeHandler
	{
		SwdbridgeHandler {
			inner_handler: (*self.inner_hook)(error),
		}
	}

	pub fn install(self) -> Result<(), InstallError>
	{
		color_eyre::eyre::set_hook(self.into_eyre_hook())
	}

	pub fn into_eyre_hook(self) -> EyreHookFunc
	{
		Box::new(move |err| Box::new(self.build_handler(err)))
	}
}

impl SwdbridgePanic
{
	pub fn install(self)
	{
		std::panic::set_hook(self.into_panic_hook());
	}

	pub fn into_panic_hook(self) -> PanicHookFunc
	{
		Box::new(move |panic_info| {
			let invocation = std::env::args_os()
				.map(|arg| arg.to_string_lossy().into_owned())
				.collect::<Vec<_>>()
				.join(" ");
			eprintln!("{} swdbridge-cli v{} crashed", "error:".red().bold(), crate_version!());
			eprintln!("  while running: {invocation}");
			eprintln!();
			(*self.inner_hook)(panic_info);
			eprintln!();
			eprintln!("{}", "This is a bug in swdbridge-cli, not in your adapter or target.".yellow());
			eprintln!(
				"{}",
				"Re-run the same command with -vv and RUST_BACKTRACE=1 and attach the full output to a bug report."
					.yellow()
			);
		})
	}
}

impl EyreHandler for SwdbridgeHandler
{
	fn debug(&self, error: &(dyn std::error::Error + 'static), fmt: &mut core::fmt::Formatter<'_>)
	-> core::fmt::Result
	{
		self.inner_handler.debug(error, fmt)?;
		// Transport failures are the one class of error worth pointing a user back at the adapter for
		let from_driver = std::iter::successors(Some(error), |err| err.source())
			.any(|err| matches!(err.downcast_ref::<SwdError>(), Some(SwdError::DriverFailure(_))));
		if from_driver {
			writeln!(fmt)?;
			writeln!(fmt)?;
			write!(fmt, "{}", "The adapter reported a failure, check its connection to the target".yellow())?;
		}
		Ok(())
	}

	fn track_caller(&mut self, location: &'static std::panic::Location<'static>)
	{
		self.inner_handler.track_caller(location);
	}
}

fn install_error_handler() -> Result<()>
{
	// Grab us a new default handler and split it into a panic hook and an error hook
	let (panic_hook, eyre_hook) = HookBuilder::default().try_into_hooks()?;

	SwdbridgePanic {
		inner_hook: panic_hook.into_panic_hook(),
	}
	.install();

	SwdbridgeHook {
		inner_hook: eyre_hook.into_eyre_hook(),
	}
	.install()?;
	Ok(())
}

fn style() -> clap::builder::Styles
{
	Styles::styled()
		.usage(
			anstyle::Style::new()
				.fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow)))
				.bold(),
		)
		.header(
			anstyle::Style::new()
				.bold()
				.fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
		)
		.literal(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))))
}

fn log_level(verbose: u8) -> LevelFilter
{
	match verbose {
		0 => LevelFilter::Info,
		1 => LevelFilter::Debug,
		_ => LevelFilter::Trace,
	}
}

fn main() -> Result<()>
{
	install_error_handler()?;
	let cli_args = CliArguments::parse();

	env_logger::Builder::new()
		.filter_level(log_level(cli_args.verbose))
		.parse_default_env()
		.init();

	match &cli_args.subcommand {
		ToplevelCommands::Pack(pack_args) => pack_args.run(),
		ToplevelCommands::Unpack(unpack_args) => unpack_args.run(),
		ToplevelCommands::Turnaround(turnaround_args) => turnaround_args.run(&cli_args),
		ToplevelCommands::Transfer(transfer_args) => transfer_args.run(&cli_args),
		ToplevelCommands::Complete(comp_args) => {
			let mut cmd = CliArguments::command();
			generate(comp_args.shell, &mut cmd, "swdbridge-cli", &mut stdout());
			Ok(())
		},
	}
}
