//! Interactive line shell over the selection page use cases.

pub mod command;
pub mod render;

use std::io::Write;

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info_span, warn, Instrument};

use vms_app::UseCases;
use vms_core::{InvestmentForm, Locale, PageQuery, SortToken, StartupId};

pub use command::{parse_line, ShellCommand};

/// What the loop should do after a command.
#[derive(Debug, PartialEq)]
pub enum Flow {
    Continue(String),
    Quit,
}

pub struct Shell {
    use_cases: UseCases,
    locale: Locale,
}

impl Shell {
    pub fn new(use_cases: UseCases, locale: Locale) -> Self {
        Self { use_cases, locale }
    }

    pub fn use_cases(&self) -> &UseCases {
        &self.use_cases
    }

    /// Read commands from stdin until `quit` or end of input.
    pub async fn run(&self) -> anyhow::Result<()> {
        let listener = self.use_cases.my_selection.start_rank_listener();
        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        loop {
            prompt()?;
            let Some(line) = lines.next_line().await.context("Failed to read stdin")? else {
                break;
            };
            let command = match parse_line(&line) {
                Ok(Some(command)) => command,
                Ok(None) => continue,
                Err(err) => {
                    println!("{}", err.render());
                    continue;
                }
            };
            match self.execute(command).await {
                Ok(Flow::Continue(output)) => println!("{}", output.trim_end()),
                Ok(Flow::Quit) => break,
                Err(err) => {
                    warn!(error = %format!("{err:#}"), "shell command failed");
                    println!("error: {err:#}");
                }
            }
        }

        listener.abort();
        Ok(())
    }

    pub async fn execute(&self, command: ShellCommand) -> anyhow::Result<Flow> {
        let span = info_span!("shell.command", command = %command_name(&command));
        self.dispatch(command).instrument(span).await
    }

    async fn dispatch(&self, command: ShellCommand) -> anyhow::Result<Flow> {
        let page = &self.use_cases.my_selection;
        let output = match command {
            ShellCommand::Pick { id } => {
                let startup = self.lookup(id).await?;
                let name = startup.name.clone();
                if page.add_primary(startup) {
                    format!("picked {id}:{name}")
                } else {
                    format!("{id} is already picked")
                }
            }
            ShellCommand::Unpick { id } => removed(page.remove_primary(id), id),
            ShellCommand::Candidate { ids } => {
                let mut added = Vec::new();
                for id in ids {
                    let startup = self.lookup(id).await?;
                    if page.add_candidate(startup)? {
                        added.push(id.to_string());
                    }
                }
                format!("candidates added: [{}]", added.join(", "))
            }
            ShellCommand::Drop { id } => removed(page.remove_candidate(id), id),
            ShellCommand::Compare => {
                page.compare().start_comparison().await?;
                self.comparison().await
            }
            ShellCommand::Cancel => {
                page.compare().cancel_comparison().await?;
                self.comparison().await
            }
            ShellCommand::Sort { token } => {
                page.compare().set_sort(&token).await?;
                self.comparison().await
            }
            ShellCommand::RankSort { token } => {
                page.rank().set_sort(&token).await?;
                render::render_rank(&page.rank_view().await, self.locale)
            }
            ShellCommand::Show => {
                // The background listener may not have caught up with the last edit.
                page.rank()
                    .sync_reference(page.selection().reference_id())
                    .await?;
                format!(
                    "{}\n{}{}",
                    render::render_selection(&page.selection()),
                    self.comparison().await,
                    render::render_rank(&page.rank_view().await, self.locale)
                )
            }
            ShellCommand::Reset => {
                page.reset_all().await?;
                "selection cleared".to_string()
            }
            ShellCommand::Invest {
                investor_id,
                name,
                amount,
                comment,
                password,
                check_password,
            } => {
                let form = InvestmentForm {
                    name,
                    invest_amount: amount,
                    comment: comment.join(" "),
                    password: password.into(),
                    check_password: check_password.into(),
                };
                self.use_cases
                    .submit_investment
                    .execute(investor_id, form)
                    .await?;
                format!("investment {investor_id} updated")
            }
            ShellCommand::Startups {
                page: number,
                keyword,
                sort,
            } => {
                let query = PageQuery {
                    keyword,
                    sort: sort.as_deref().map(SortToken::decode),
                    ..PageQuery::page(number.unwrap_or(1))
                };
                let listing = self.use_cases.list_startups.execute(query).await?;
                render::render_page(&listing, self.locale)
            }
            ShellCommand::Quit => return Ok(Flow::Quit),
        };
        Ok(Flow::Continue(output))
    }

    async fn lookup(&self, id: StartupId) -> anyhow::Result<vms_core::Startup> {
        self.use_cases
            .get_startup
            .execute(id)
            .await
            .with_context(|| format!("startup {id} could not be loaded"))
    }

    async fn comparison(&self) -> String {
        render::render_comparison(
            &self.use_cases.my_selection.comparison_view().await,
            self.locale,
        )
    }
}

fn removed(removed: bool, id: StartupId) -> String {
    if removed {
        format!("removed {id}")
    } else {
        format!("{id} was not selected")
    }
}

fn command_name(command: &ShellCommand) -> &'static str {
    match command {
        ShellCommand::Pick { .. } => "pick",
        ShellCommand::Unpick { .. } => "unpick",
        ShellCommand::Candidate { .. } => "candidate",
        ShellCommand::Drop { .. } => "drop",
        ShellCommand::Compare => "compare",
        ShellCommand::Cancel => "cancel",
        ShellCommand::Sort { .. } => "sort",
        ShellCommand::RankSort { .. } => "rank-sort",
        ShellCommand::Show => "show",
        ShellCommand::Reset => "reset",
        ShellCommand::Invest { .. } => "invest",
        ShellCommand::Startups { .. } => "startups",
        ShellCommand::Quit => "quit",
    }
}

fn prompt() -> anyhow::Result<()> {
    let mut stdout = std::io::stdout();
    write!(stdout, "vms> ")?;
    stdout.flush()?;
    Ok(())
}
