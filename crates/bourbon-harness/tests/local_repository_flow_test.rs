//! Full-stack flows over the local account directory.
//!
//! Same runtime as production, backed by `LocalUserRepository` over an
//! in-memory store shared between two runtime lifetimes.

use std::{future::Future, time::Duration};

use bourbon_app::{Runtime, RuntimeConfig};
use bourbon_core::{
    ActivityLevel, AuthInput, AuthType, Diet, Gender, Goal, LaunchDecision, OnboardingInput,
    RoutePath, Training,
};
use bourbon_store::{LocalUserRepository, MemoryStore, ProfileStore};

async fn settle<T>(fut: impl Future<Output = T>) -> T {
    tokio::time::timeout(Duration::from_secs(60), fut).await.expect("flow did not settle")
}

async fn wait_for_routes(runtime: &Runtime<LocalUserRepository<MemoryStore>>, routes: &[RoutePath]) {
    settle(runtime.router().wait_for(|router| router.backstack().routes() == routes)).await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_register_onboard_and_relaunch() {
    let store = MemoryStore::new();

    {
        let runtime =
            Runtime::start(LocalUserRepository::new(store.clone()), RuntimeConfig::default()).unwrap();
        assert_eq!(settle(runtime.launch()).await, LaunchDecision::Redirect(RoutePath::Auth));
        wait_for_routes(&runtime, &[RoutePath::Auth]).await;

        let auth = runtime.open_auth();
        auth.send(AuthInput::SwitchAuthType(AuthType::Register));
        auth.send(AuthInput::EmailChanged("Kim@Example.com".into()));
        auth.send(AuthInput::PasswordChanged("hunter22".into()));
        auth.send(AuthInput::ConfirmPasswordChanged("hunter22".into()));
        auth.send(AuthInput::ConfirmButton);
        wait_for_routes(&runtime, &[RoutePath::Onboarding]).await;
        auth.close();

        let wizard = runtime.open_onboarding();
        let inputs = [
            OnboardingInput::WeightChanged("64.5".into()),
            OnboardingInput::HeightChanged("168".into()),
            OnboardingInput::GenderSelected(Gender::Female),
            OnboardingInput::AgeChanged("41".into()),
            OnboardingInput::GoalSelected(Goal::GainWeight),
            OnboardingInput::TargetWeightChanged("68".into()),
            OnboardingInput::TrainingSelected(Training::Strength),
            OnboardingInput::ActivityLevelSelected(ActivityLevel::Sedentary),
            OnboardingInput::DietSelected(Diet::Keto),
            OnboardingInput::MealFrequencyChanged(5),
        ];
        for input in inputs {
            wizard.send(input);
        }
        for _ in 0..9 {
            wizard.send(OnboardingInput::NextButton);
        }
        wait_for_routes(&runtime, &[RoutePath::Home]).await;

        runtime.shutdown();
    }

    assert_eq!(store.load_session().unwrap().as_deref(), Some("kim@example.com"));

    let runtime = Runtime::start(LocalUserRepository::new(store), RuntimeConfig::default()).unwrap();
    assert_eq!(settle(runtime.launch()).await, LaunchDecision::Stay);
    assert_eq!(runtime.backstack().routes(), vec![RoutePath::Home]);

    settle(runtime.sign_out()).await.unwrap();
    wait_for_routes(&runtime, &[RoutePath::Auth]).await;
}
