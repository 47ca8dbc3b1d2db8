//! Startup routing decision.

use crate::RoutePath;

/// What the startup check learned about the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionProbe {
    /// No signed-in user.
    LoggedOut,
    /// The check itself failed.
    Unknown,
    /// Signed in, profile not completed.
    MissingProfile,
    /// Signed in with a completed profile.
    ProfileReady,
}

/// Where the app goes after the startup check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LaunchDecision {
    /// Keep the current destination.
    Stay,
    /// Replace the current destination with this route.
    Redirect(RoutePath),
}

impl SessionProbe {
    /// Map the probe to a decision. An inconclusive probe never grants
    /// access.
    pub fn decide(self) -> LaunchDecision {
        match self {
            Self::LoggedOut | Self::Unknown => LaunchDecision::Redirect(RoutePath::Auth),
            Self::MissingProfile => LaunchDecision::Redirect(RoutePath::Onboarding),
            Self::ProfileReady => LaunchDecision::Stay,
        }
    }

    /// Landing route right after an explicit sign-in. `None` if the profile
    /// state is unknown and the user should stay on the auth screen.
    pub fn after_sign_in(self) -> Option<RoutePath> {
        match self {
            Self::ProfileReady => Some(RoutePath::Home),
            Self::MissingProfile => Some(RoutePath::Onboarding),
            Self::LoggedOut | Self::Unknown => None,
        }
    }
}
