//! Screen host driving the runtime one command at a time.
//!
//! The shell keeps one session open for the current route and swaps it as
//! navigation moves. After every command it waits until the command's
//! effects have landed, so what it prints is settled state rather than a
//! snapshot taken mid-flight.

use std::{future::Future, time::Duration};

use bourbon_app::{AuthSession, DeckSession, OnboardingSession, Runtime, RuntimeError};
use bourbon_core::{AuthInput, DeckInput, OnboardingInput, Resolution, RoutePath, Submission, route};
use bourbon_store::{LocalUserRepository, ProfileStore};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::{
    CliError, Command, catalogue,
    command::{self, HELP},
    render::{AuthView, DeckView, EventView, StackView, WizardView},
};

/// Slack on top of the splash duration before a wait counts as stuck.
const SETTLE_MARGIN: Duration = Duration::from_secs(5);

/// Whether the shell keeps reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Read the next command.
    Continue,
    /// Stop.
    Quit,
}

/// Session backing the current route.
enum Screen {
    Plain(RoutePath),
    Auth(AuthSession),
    Onboarding(OnboardingSession),
    Exercises(DeckSession),
}

impl Screen {
    fn open<S: ProfileStore>(runtime: &Runtime<LocalUserRepository<S>>, route: RoutePath) -> Self {
        match route {
            RoutePath::Auth => Self::Auth(runtime.open_auth()),
            RoutePath::Onboarding => Self::Onboarding(runtime.open_onboarding()),
            RoutePath::ExerciseList => Self::Exercises(runtime.open_exercises(catalogue::exercises())),
            other => Self::Plain(other),
        }
    }

    fn route(&self) -> RoutePath {
        match self {
            Self::Plain(route) => *route,
            Self::Auth(_) => RoutePath::Auth,
            Self::Onboarding(_) => RoutePath::Onboarding,
            Self::Exercises(_) => RoutePath::ExerciseList,
        }
    }

    fn close(self) {
        match self {
            Self::Plain(_) => {},
            Self::Auth(session) => session.close(),
            Self::Onboarding(session) => session.close(),
            Self::Exercises(session) => session.close(),
        }
    }
}

/// Interactive host for a [`Runtime`] over a local account store.
pub struct Shell<S: ProfileStore> {
    runtime: Runtime<LocalUserRepository<S>>,
    screen: Screen,
    patience: Duration,
}

impl<S: ProfileStore> Shell<S> {
    /// Host `runtime`, opening the session for its current route.
    pub fn new(runtime: Runtime<LocalUserRepository<S>>) -> Self {
        let patience = runtime.config().splash_duration + SETTLE_MARGIN;
        let screen = Screen::open(&runtime, runtime.backstack().current().route());
        Self { runtime, screen, patience }
    }

    /// Hosted runtime.
    pub fn runtime(&self) -> &Runtime<LocalUserRepository<S>> {
        &self.runtime
    }

    /// Read commands from `input` until it ends or a quit command, writing
    /// each command's output to `output`. With `echo`, every command line is
    /// written back first, so scripted runs read like a transcript.
    pub async fn run<R, W>(&mut self, input: R, output: &mut W, echo: bool) -> Result<(), CliError>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = input.lines();
        while let Some(line) = lines.next_line().await? {
            let Some(command) = command::parse(&line) else {
                continue;
            };
            if echo {
                write_block(output, &format!("> {}", line.trim())).await?;
            }

            let (flow, text) = self.execute(command).await?;
            write_block(output, &text).await?;
            if flow == Flow::Quit {
                break;
            }
        }
        Ok(())
    }

    /// Apply one command and describe the settled result.
    pub async fn execute(&mut self, command: Command) -> Result<(Flow, String), CliError> {
        let mut lines = Vec::new();
        match command {
            Command::Go { target } => {
                let unresolved = is_unresolved(&target);
                self.runtime.navigate(target);
                self.settle_router(unresolved, &mut lines).await?;
            },
            Command::Replace { target } => {
                let unresolved = is_unresolved(&target);
                self.runtime.replace(target);
                self.settle_router(unresolved, &mut lines).await?;
            },
            Command::Back(to) => {
                self.runtime.back(to);
                self.settle_router(false, &mut lines).await?;
            },
            Command::SystemBack => {
                let deferred = !self.runtime.intercepts_back();
                self.runtime.system_back();
                self.settle_router(deferred, &mut lines).await?;
            },
            Command::Stack => {},
            Command::Launch => {
                let decision = self.runtime.launch().await;
                lines.push(format!("launch: {decision:?}"));
                self.settle_router(false, &mut lines).await?;
            },
            Command::SignOut => {
                self.runtime.sign_out().await?;
                self.settle_router(false, &mut lines).await?;
            },
            Command::Wizard(input) => self.wizard(input, &mut lines).await?,
            Command::Auth(input) => self.auth(input, &mut lines).await?,
            Command::Deck(input) => self.deck(input, &mut lines).await?,
            Command::Help => return Ok((Flow::Continue, HELP.to_owned())),
            Command::Quit => return Ok((Flow::Quit, String::new())),
            Command::Unknown { input } => {
                return Ok((Flow::Continue, format!("unknown command: {input} (try help)")));
            },
            Command::InvalidArgs { command, error } => {
                return Ok((Flow::Continue, format!("{command}: {error}")));
            },
        }

        self.sync_screen();
        self.render(&mut lines);
        Ok((Flow::Continue, lines.join("\n")))
    }

    /// Save the backstack for `--resume`.
    pub fn save(&self) -> Result<(), CliError> {
        let backstack = self.runtime.backstack();
        self.runtime.repository().store().store_backstack(&backstack)?;
        tracing::info!(depth = backstack.len(), "backstack saved");
        Ok(())
    }

    /// Close the open screen and stop the runtime.
    pub fn shutdown(self) {
        self.screen.close();
        self.runtime.shutdown();
    }

    async fn wizard(&mut self, input: OnboardingInput, lines: &mut Vec<String>) -> Result<(), CliError> {
        let Screen::Onboarding(session) = &self.screen else {
            lines.push(self.unavailable("onboarding"));
            return Ok(());
        };
        let router = self.runtime.router();
        let wizard = session.handle();

        // Back on the first page hands over to the router.
        let exits = input == OnboardingInput::BackButton
            && wizard.state().page() == 0
            && self.runtime.backstack().len() > 1;
        let before = router.snapshot().revision;
        wizard.send(input);
        wizard.flush().await?;

        if exits {
            self.wait("onboarding exit", router.changed_since(before)).await?;
        } else if *wizard.state().submission() == Submission::InFlight {
            let saved = router.changed_since(before);
            let failed = wizard.wait_for(|w| *w.submission() != Submission::InFlight);
            self.wait("profile submission", async {
                tokio::select! {
                    result = saved => result.map(drop),
                    result = failed => result.map(drop),
                }
            })
            .await?;
            self.wait(
                "splash",
                router.wait_for(|r| r.current().route() != RoutePath::SplashAfterOnboarding),
            )
            .await?;
        }
        Ok(())
    }

    async fn auth(&mut self, input: AuthInput, lines: &mut Vec<String>) -> Result<(), CliError> {
        let Screen::Auth(session) = &self.screen else {
            lines.push(self.unavailable("auth"));
            return Ok(());
        };
        let router = self.runtime.router();
        let auth = session.handle();

        let before = router.snapshot().revision;
        auth.send(input);
        auth.flush().await?;

        if auth.state().is_loading() {
            let settled = self.wait("sign-in", auth.wait_for(|a| !a.is_loading())).await?;
            if settled.state.failure().is_none() {
                self.wait("sign-in redirect", router.changed_since(before)).await?;
            }
        }
        Ok(())
    }

    async fn deck(&mut self, input: DeckInput, lines: &mut Vec<String>) -> Result<(), CliError> {
        let Screen::Exercises(session) = &self.screen else {
            lines.push(self.unavailable("exercise"));
            return Ok(());
        };
        session.send(input);
        session.handle().flush().await?;
        Ok(())
    }

    /// Flush the router and collect shell events. With `expect_event`, waits
    /// for the event the last intent is known to produce.
    async fn settle_router(&mut self, expect_event: bool, lines: &mut Vec<String>) -> Result<(), CliError> {
        self.runtime.router().flush().await?;
        if expect_event {
            let event = tokio::time::timeout(self.patience, self.runtime.next_shell_event())
                .await
                .map_err(|_| CliError::Timeout { what: "shell event" })?;
            lines.extend(event.map(|e| EventView(&e).to_string()));
        }
        while let Some(event) = self.runtime.try_shell_event() {
            lines.push(EventView(&event).to_string());
        }
        Ok(())
    }

    async fn wait<T>(
        &self,
        what: &'static str,
        fut: impl Future<Output = Result<T, RuntimeError>>,
    ) -> Result<T, CliError> {
        tokio::time::timeout(self.patience, fut)
            .await
            .map_err(|_| CliError::Timeout { what })?
            .map_err(CliError::from)
    }

    fn sync_screen(&mut self) {
        let route = self.runtime.backstack().current().route();
        if self.screen.route() == route {
            return;
        }
        let previous = std::mem::replace(&mut self.screen, Screen::open(&self.runtime, route));
        tracing::debug!(from = ?previous.route(), to = ?route, "screen changed");
        previous.close();
    }

    fn render(&self, lines: &mut Vec<String>) {
        lines.push(StackView(&self.runtime.backstack()).to_string());
        match &self.screen {
            Screen::Plain(_) => {},
            Screen::Auth(session) => lines.push(AuthView(&session.snapshot().state).to_string()),
            Screen::Onboarding(session) => {
                lines.push(WizardView(&session.snapshot().state).to_string());
            },
            Screen::Exercises(session) => lines.push(DeckView(&session.snapshot().state).to_string()),
        }
    }

    fn unavailable(&self, screen: &str) -> String {
        format!("no {screen} screen on {}", self.runtime.backstack().current())
    }
}

fn is_unresolved(url: &str) -> bool {
    matches!(route::resolve(url), Resolution::NotFound { .. })
}

async fn write_block<W: AsyncWrite + Unpin>(output: &mut W, text: &str) -> Result<(), CliError> {
    if text.is_empty() {
        return Ok(());
    }
    output.write_all(text.as_bytes()).await?;
    output.write_all(b"\n").await?;
    output.flush().await?;
    Ok(())
}
