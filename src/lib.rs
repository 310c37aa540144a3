//! # vs - Visual Studio installation front end
//!
//! `vs` finds, modifies and remembers Visual Studio installations by driving
//! two external tools: the locator (`vswhere`) and the installer
//! (`vs_installer`). Arguments it does not understand are passed through to
//! the tool untouched, and tool output is streamed line by line as it
//! arrives.
//!
//! ## Quick Start
//!
//! ```bash
//! # List instances, filtered by edition
//! vs where --sku pro -format json
//!
//! # Add a workload to an installed instance
//! vs modify --sku ent +cpp
//!
//! # Save a command line and run it later
//! vs save --save=pro -g where --sku pro -latest
//! vs pro
//! ```
//!
//! ## Configuration
//!
//! Settings are stored in `~/.config/vs/config.toml`:
//!
//! ```toml
//! [vs]
//! quiet = false
//! timeout_secs = 600
//!
//! [tools]
//! locator = "C:/tools/vswhere.exe"
//!
//! [aliases]
//! pro = ["where", "--sku", "pro"]
//! ```

/// Interactive selection among several instances.
pub mod chooser;

/// Command-line interface definitions and handlers.
pub mod cli;

/// Configuration file management.
pub mod config;

/// File system utilities.
pub mod fs;

/// Instance records decoded from the locator.
pub mod instance;

/// Option declarations and pass-through parsing.
pub mod options;

/// Global output configuration (quiet mode, colors, stderr/stdout routing).
pub mod output;

/// XDG-style configuration paths and tool locations.
pub mod paths;

/// External process launching and output streaming.
pub mod process;

/// Locator and installer conventions.
pub mod services;

/// Terminal UI components (spinner, colors, prompts).
pub mod ui;
