//! Subcommands exposed by the `tocsin` binary.

pub mod dry_run;

pub use dry_run::DryRunArgs;
