//! Runtime wiring the navigation machines to their collaborators.
//!
//! The [`Runtime`] owns the router actor and a cancellation [`Scope`]. Each
//! screen that needs a controller opens a [`Session`]: the session's machine
//! runs in a child scope together with an effect task that executes the
//! machine's actions against the [`UserRepository`] and feeds results back as
//! inputs. Dropping a session tears both down; dropping the runtime tears
//! everything down.
//!
//! Sessions receive the router handle explicitly. Nothing looks the router up
//! ambiently.

use std::time::Duration;

use bourbon_core::{
    AuthAction, AuthInput, AuthMachine, BackTo, Backstack, Exercise, ExerciseDeck,
    LaunchDecision, Onboarding, OnboardingAction, OnboardingInput, RoutePath, Router,
    RouterAction, RouterInput, SessionProbe, Target, User, UserData, router::DEFAULT_EXCLUDED,
};
use tokio::sync::mpsc;

use crate::{
    Machine, MachineHandle, RepositoryError, RuntimeError, Scope, Snapshot, UserRepository,
    mailbox,
};

/// Delay before the startup session check.
pub const DEFAULT_STARTUP_DELAY: Duration = Duration::from_millis(50);

/// How long the post-onboarding splash stays up.
pub const DEFAULT_SPLASH_DURATION: Duration = Duration::from_secs(2);

/// Runtime configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct RuntimeConfig {
    /// Initial destination when nothing is restored.
    pub root: RoutePath,
    /// Routes where system back is left to the platform.
    pub back_excluded: Vec<RoutePath>,
    /// Delay before the startup session check.
    pub startup_delay: Duration,
    /// How long the post-onboarding splash stays up.
    pub splash_duration: Duration,
    /// Saved backstack to resume from instead of `root`.
    pub restore: Option<Backstack>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            root: RoutePath::Home,
            back_excluded: DEFAULT_EXCLUDED.to_vec(),
            startup_delay: DEFAULT_STARTUP_DELAY,
            splash_duration: DEFAULT_SPLASH_DURATION,
            restore: None,
        }
    }
}

/// Notifications for the host shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellEvent {
    /// System back was not intercepted; apply the platform default.
    PlatformBack,
    /// A URL resolved to no route.
    NotFound {
        /// Unresolved path.
        path: String,
    },
}

/// A screen controller running under the runtime.
///
/// Dropping the session stops its machine and any in-flight effects.
pub struct Session<M: Machine> {
    handle: MachineHandle<M>,
    scope: Scope,
}

impl<M: Machine> Session<M> {
    /// Handle to the session's machine.
    pub fn handle(&self) -> &MachineHandle<M> {
        &self.handle
    }

    /// Queue an input. Returns `false` once the session is closed.
    pub fn send(&self, input: M::Input) -> bool {
        self.handle.send(input)
    }

    /// Latest published snapshot.
    pub fn snapshot(&self) -> Snapshot<M::State> {
        self.handle.snapshot()
    }

    /// Stop the machine and its effects.
    pub fn close(self) {
        self.scope.cancel();
    }
}

/// Onboarding wizard session.
pub type OnboardingSession = Session<Onboarding>;
/// Auth form session.
pub type AuthSession = Session<AuthMachine>;
/// Exercise deck session.
pub type DeckSession = Session<ExerciseDeck>;

/// Orchestrates the router, screen sessions, and the user repository.
pub struct Runtime<R: UserRepository> {
    repository: R,
    config: RuntimeConfig,
    router: MachineHandle<Router>,
    shell: mpsc::UnboundedReceiver<ShellEvent>,
    scope: Scope,
}

impl<R: UserRepository> Runtime<R> {
    /// Spawn the router on the current tokio runtime. Must be called from
    /// within a runtime context.
    ///
    /// # Errors
    ///
    /// Returns [`RuntimeError::Route`] if the configured root needs path
    /// parameters.
    pub fn start(repository: R, config: RuntimeConfig) -> Result<Self, RuntimeError> {
        let router = match config.restore.clone() {
            Some(backstack) => Router::restore(backstack),
            None => Router::at(config.root)?,
        }
        .with_excluded(config.back_excluded.iter().copied());

        let scope = Scope::new();
        tracing::info!(current = %router.current(), depth = router.backstack().len(), "runtime started");
        let (router, mut effects) = mailbox::spawn(router, &scope);

        let (shell_tx, shell) = mpsc::unbounded_channel();
        scope.spawn(async move {
            while let Some(action) = effects.recv().await {
                let event = match action {
                    RouterAction::DeferBack => ShellEvent::PlatformBack,
                    RouterAction::NotFound { path } => {
                        tracing::warn!(%path, "no route for path");
                        ShellEvent::NotFound { path }
                    },
                    RouterAction::Render => continue,
                };
                if shell_tx.send(event).is_err() {
                    break;
                }
            }
        });

        Ok(Self { repository, config, router, shell, scope })
    }

    /// Router handle.
    pub fn router(&self) -> &MachineHandle<Router> {
        &self.router
    }

    /// Latest published backstack.
    pub fn backstack(&self) -> Backstack {
        self.router.state().backstack().clone()
    }

    /// Returns true if a system back would pop the latest published stack.
    pub fn intercepts_back(&self) -> bool {
        self.router.state().intercepts_back()
    }

    /// Repository used for effects.
    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// Active configuration.
    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// Push a destination.
    pub fn navigate(&self, target: impl Into<Target>) -> bool {
        self.router.send(RouterInput::GoToDestination(target.into()))
    }

    /// Replace the current destination.
    pub fn replace(&self, target: impl Into<Target>) -> bool {
        self.router.send(RouterInput::ReplaceTopDestination(target.into()))
    }

    /// Unwind the backstack.
    pub fn back(&self, to: BackTo) -> bool {
        self.router.send(RouterInput::GoBack(to))
    }

    /// Forward the platform back action. A deferred back is reported as
    /// [`ShellEvent::PlatformBack`].
    pub fn system_back(&self) -> bool {
        self.router.send(RouterInput::SystemBack)
    }

    /// Next shell notification. `None` once the runtime is shut down.
    pub async fn next_shell_event(&mut self) -> Option<ShellEvent> {
        self.shell.recv().await
    }

    /// Shell notification if one is already queued.
    pub fn try_shell_event(&mut self) -> Option<ShellEvent> {
        self.shell.try_recv().ok()
    }

    /// Run the startup check and redirect accordingly.
    ///
    /// Waits [`RuntimeConfig::startup_delay`] first. A failing check is
    /// treated as signed out.
    pub async fn launch(&self) -> LaunchDecision {
        tokio::time::sleep(self.config.startup_delay).await;

        let probe = probe_session(&self.repository).await;
        let decision = probe.decide();
        tracing::info!(?probe, ?decision, "launch");

        match decision {
            LaunchDecision::Redirect(route) => {
                self.replace(route);
            },
            LaunchDecision::Stay => {
                if let Err(err) = self.repository.load_user_fully().await {
                    tracing::warn!(%err, "loading profile failed");
                }
            },
        }
        decision
    }

    /// Sign out and return to the auth screen.
    pub async fn sign_out(&self) -> Result<(), RuntimeError> {
        self.repository.sign_out().await?;
        self.router.send(RouterInput::Land(RoutePath::Auth));
        Ok(())
    }

    /// Start the onboarding wizard.
    ///
    /// `Submit` saves the profile for the signed-in user, shows the splash,
    /// then lands on Home. A failed save is fed back as
    /// [`OnboardingInput::SubmissionFailed`]. `ExitBack` pops the router.
    pub fn open_onboarding(&self) -> OnboardingSession {
        let scope = self.scope.child();
        let (wizard, mut effects) = mailbox::spawn(Onboarding::new(), &scope);

        let repository = self.repository.clone();
        let router = self.router.clone();
        let feedback = wizard.clone();
        let splash = self.config.splash_duration;
        scope.spawn(async move {
            while let Some(action) = effects.recv().await {
                match action {
                    OnboardingAction::Submit(data) => {
                        submit_profile(&repository, &router, &feedback, &data, splash).await;
                    },
                    OnboardingAction::ExitBack => {
                        router.send(RouterInput::GoBack(BackTo::Previous));
                    },
                    OnboardingAction::Render => {},
                }
            }
        });

        Session { handle: wizard, scope }
    }

    /// Start the auth form.
    ///
    /// Credential actions call the repository. On success the user lands on
    /// Home or Onboarding depending on whether a profile exists; failures are
    /// fed back as [`AuthInput::Failed`].
    pub fn open_auth(&self) -> AuthSession {
        let scope = self.scope.child();
        let (auth, mut effects) = mailbox::spawn(AuthMachine::new(), &scope);

        let repository = self.repository.clone();
        let router = self.router.clone();
        let feedback = auth.clone();
        scope.spawn(async move {
            while let Some(action) = effects.recv().await {
                let result = match action {
                    AuthAction::SignIn { email, password } => {
                        repository.sign_in_with_email(&email, &password).await
                    },
                    AuthAction::SignUp { email, password } => {
                        repository.sign_up_with_email(&email, &password).await
                    },
                    AuthAction::SignInWithGoogle => repository.sign_in_with_google().await,
                    AuthAction::Render => continue,
                };
                complete_sign_in(&repository, &router, &feedback, result).await;
            }
        });

        Session { handle: auth, scope }
    }

    /// Start an exercise deck over `exercises`.
    pub fn open_exercises(&self, exercises: Vec<Exercise>) -> DeckSession {
        let scope = self.scope.child();
        let (deck, _effects) = mailbox::spawn(ExerciseDeck::new(exercises), &scope);
        Session { handle: deck, scope }
    }

    /// Stop the router and every open session.
    pub fn shutdown(&self) {
        tracing::info!("runtime shutting down");
        self.scope.cancel();
    }
}

/// Determine the session state at startup. Collaborator failures yield
/// [`SessionProbe::Unknown`].
pub async fn probe_session<R: UserRepository>(repository: &R) -> SessionProbe {
    match repository.is_logged_in().await {
        Ok(false) => SessionProbe::LoggedOut,
        Ok(true) => match repository.current_user().await {
            Ok(Some(user)) => probe_user(repository, &user).await,
            Ok(None) => SessionProbe::LoggedOut,
            Err(err) => {
                tracing::warn!(%err, "current user lookup failed");
                SessionProbe::Unknown
            },
        },
        Err(err) => {
            tracing::warn!(%err, "login check failed");
            SessionProbe::Unknown
        },
    }
}

async fn probe_user<R: UserRepository>(repository: &R, user: &User) -> SessionProbe {
    match repository.has_data(user).await {
        Ok(true) => SessionProbe::ProfileReady,
        Ok(false) => SessionProbe::MissingProfile,
        Err(err) => {
            tracing::warn!(uid = %user.uid, %err, "profile check failed");
            SessionProbe::Unknown
        },
    }
}

async fn save_profile<R: UserRepository>(repository: &R, data: &UserData) -> Result<(), RepositoryError> {
    let user = repository.current_user().await?.ok_or(RepositoryError::NotSignedIn)?;
    repository.save_data(&user, data).await
}

async fn submit_profile<R: UserRepository>(
    repository: &R,
    router: &MachineHandle<Router>,
    wizard: &MachineHandle<Onboarding>,
    data: &UserData,
    splash: Duration,
) {
    if let Err(err) = save_profile(repository, data).await {
        tracing::warn!(%err, "saving profile failed");
        wizard.send(OnboardingInput::SubmissionFailed { message: err.to_string() });
        return;
    }

    tracing::info!("profile saved");
    router.send(RouterInput::ReplaceTopDestination(RoutePath::SplashAfterOnboarding.into()));
    tokio::time::sleep(splash).await;
    router.send(RouterInput::Land(RoutePath::Home));
}

async fn complete_sign_in<R: UserRepository>(
    repository: &R,
    router: &MachineHandle<Router>,
    auth: &MachineHandle<AuthMachine>,
    result: Result<User, RepositoryError>,
) {
    let user = match result {
        Ok(user) => user,
        Err(err) => {
            tracing::warn!(%err, "sign-in failed");
            auth.send(AuthInput::Failed { message: err.to_string() });
            return;
        },
    };

    let probe = probe_user(repository, &user).await;
    let Some(route) = probe.after_sign_in() else {
        auth.send(AuthInput::Failed { message: "could not load your profile".into() });
        return;
    };

    if probe == SessionProbe::ProfileReady
        && let Err(err) = repository.load_user_fully().await
    {
        tracing::warn!(%err, "loading profile failed");
    }

    tracing::info!(uid = %user.uid, ?route, "signed in");
    auth.send(AuthInput::Succeeded);
    router.send(RouterInput::Land(route));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = RuntimeConfig::default();
        assert_eq!(config.root, RoutePath::Home);
        assert_eq!(config.startup_delay, Duration::from_millis(50));
        assert_eq!(config.back_excluded, vec![RoutePath::SplashAfterOnboarding, RoutePath::Onboarding]);
    }
}
