//! Shell line grammar.

use clap::{Parser, Subcommand};

use vms_core::{InvestorId, StartupId};

#[derive(Parser, Debug)]
#[command(multicall = true)]
struct ShellLine {
    #[command(subcommand)]
    command: ShellCommand,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum ShellCommand {
    /// Add one of my startups (primary selection)
    Pick { id: StartupId },
    /// Remove a startup from my selection
    Unpick { id: StartupId },
    /// Add comparison candidates
    Candidate {
        #[arg(required = true)]
        ids: Vec<StartupId>,
    },
    /// Remove a comparison candidate
    Drop { id: StartupId },
    /// Run the comparison
    Compare,
    /// Cancel the comparison
    Cancel,
    /// Sort the comparison table, e.g. `simInvest_desc`
    Sort { token: String },
    /// Sort the rank table, e.g. `revenue_asc`
    RankSort { token: String },
    /// Print selections and both result tables
    Show,
    /// Clear selections and results
    Reset,
    /// Update an investment
    Invest {
        investor_id: InvestorId,
        #[arg(long)]
        name: String,
        #[arg(long)]
        amount: String,
        #[arg(long, num_args = 1.., required = true)]
        comment: Vec<String>,
        #[arg(long)]
        password: String,
        #[arg(long = "check-password")]
        check_password: String,
    },
    /// Browse the startup catalog
    Startups {
        page: Option<u32>,
        #[arg(long)]
        keyword: Option<String>,
        #[arg(long)]
        sort: Option<String>,
    },
    /// Leave the shell
    #[command(alias = "exit")]
    Quit,
}

/// Parse one input line. Blank lines yield `Ok(None)`.
pub fn parse_line(line: &str) -> Result<Option<ShellCommand>, clap::Error> {
    let words: Vec<&str> = line.split_whitespace().collect();
    if words.is_empty() {
        return Ok(None);
    }
    ShellLine::try_parse_from(words).map(|parsed| Some(parsed.command))
}
