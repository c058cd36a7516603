//! Command line definitions

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use plural_core::MemberId;

/// Plural system member tracker
#[derive(Parser, Debug)]
#[command(name = "plural")]
#[command(about = "Track the members of a plural system and their chat log")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List, inspect and edit members
    #[command(subcommand)]
    Members(MembersCommand),

    /// Replace all members with a remote or exported member list
    #[command(subcommand)]
    Import(ImportCommand),

    /// Send and read chat messages
    #[command(subcommand)]
    Messages(MessagesCommand),

    /// Write, read and search diary entries
    #[command(subcommand)]
    Diary(DiaryCommand),

    /// Work with theme color tables
    #[command(subcommand)]
    Themes(ThemesCommand),

    /// Write all members in the settings file format (stdout when no path is given)
    Export {
        path: Option<PathBuf>,
    },
}

#[derive(Subcommand, Debug)]
pub enum MembersCommand {
    /// List all members
    List,

    /// Show one member as JSON
    Show { id: MemberId },

    /// Create a member; without a name the placeholder name is used
    Create { name: Option<String> },

    /// Change one field: name, pronouns, avatar, color, description or proxy
    ///
    /// An empty value clears optional fields. `proxy` takes a JSON array
    /// such as '[{"prefix":"a:"}]'.
    Set {
        id: MemberId,
        field: String,
        value: String,
    },
}

/// Options shared by every import
#[derive(Args, Debug, Clone, Copy)]
pub struct ConfirmArgs {
    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

#[derive(Subcommand, Debug)]
pub enum ImportCommand {
    /// Import the public member list of a PluralKit system
    Pluralkit {
        /// 5 or 6 character system id
        system_id: String,
        #[command(flatten)]
        confirm: ConfirmArgs,
    },

    /// Import the members of a Simply Plural account
    Simplyplural {
        /// Account id (Settings > Account > Account Settings)
        account_id: String,
        /// Account token (Settings > Account > Tokens)
        #[arg(long, env = "SIMPLYPLURAL_TOKEN", hide_env_values = true)]
        token: String,
        #[command(flatten)]
        confirm: ConfirmArgs,
    },

    /// Import the members of a PluralKit export file (`pk;export`)
    PluralkitExport {
        path: PathBuf,
        #[command(flatten)]
        confirm: ConfirmArgs,
    },

    /// Replace members with the contents of an exported settings file
    File {
        path: PathBuf,
        #[command(flatten)]
        confirm: ConfirmArgs,
    },
}

#[derive(Subcommand, Debug)]
pub enum MessagesCommand {
    /// Send a message; proxy tags pick the member, `--as` is the fallback
    Send {
        text: String,
        #[arg(long = "as")]
        as_member: Option<MemberId>,
    },

    /// Show the most recent messages, newest first
    List {
        #[arg(short, long, default_value_t = 20)]
        limit: i64,
    },
}

#[derive(Subcommand, Debug)]
pub enum DiaryCommand {
    /// Write a new entry for a member
    Add {
        member: MemberId,
        content: String,
        #[arg(short, long)]
        title: Option<String>,
    },

    /// List entries, newest first
    List {
        #[arg(short, long)]
        member: Option<MemberId>,
        #[arg(short, long)]
        limit: Option<i64>,
    },

    /// Show one entry in full
    Show { id: i64 },

    /// Change the title or content of an entry; an empty title removes it
    Edit {
        id: i64,
        #[arg(short, long)]
        title: Option<String>,
        #[arg(short, long)]
        content: Option<String>,
    },

    /// Delete an entry
    Delete { id: i64 },

    /// Find entries whose title or content contains a term
    Search {
        term: String,
        #[arg(short, long)]
        member: Option<MemberId>,
    },
}

#[derive(Subcommand, Debug)]
pub enum ThemesCommand {
    /// Decode a theme table and report each theme
    Check { path: PathBuf },
}
