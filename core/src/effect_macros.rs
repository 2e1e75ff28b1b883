//! Declarative macros for ergonomic effect construction

/// Create an `Effect::Future` from an async block
///
/// # Example
///
/// ```rust,ignore
/// use turfbook_core::async_effect;
///
/// async_effect! {
///     let venues = remote.list_venues(&city).await;
///     Some(AppAction::VenuesLoaded { city, venues })
/// }
/// ```
#[macro_export]
macro_rules! async_effect {
    ($($body:tt)*) => {
        $crate::effect::Effect::Future(
            ::std::boxed::Box::pin(async move { $($body)* })
        )
    };
}

/// Create an `Effect::Delay` for scheduling delayed actions
///
/// # Example
///
/// ```rust,ignore
/// use turfbook_core::delay;
/// use std::time::Duration;
///
/// delay! {
///     duration: Duration::from_secs(1),
///     action: AppAction::HoldTick { epoch }
/// }
/// ```
#[macro_export]
macro_rules! delay {
    (
        duration: $duration:expr,
        action: $action:expr
    ) => {
        $crate::effect::Effect::Delay {
            duration: $duration,
            action: ::std::boxed::Box::new($action),
        }
    };
}

/// Wrap an effect in `Effect::Cancellable` under the given id
///
/// # Example
///
/// ```rust,ignore
/// use turfbook_core::cancellable;
///
/// cancellable! {
///     id: HOLD_TIMER,
///     effect: delay! { duration: tick, action: AppAction::HoldTick { epoch } }
/// }
/// ```
#[macro_export]
macro_rules! cancellable {
    (
        id: $id:expr,
        effect: $effect:expr
    ) => {
        $crate::effect::Effect::Cancellable {
            id: $id,
            effect: ::std::boxed::Box::new($effect),
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::effect::{Effect, EffectId};
    use std::time::Duration;

    #[derive(Clone, Debug)]
    enum TestAction {
        Loaded { value: i32 },
        Tick,
    }

    #[test]
    fn test_async_effect_macro() {
        let effect = async_effect! {
            Some(TestAction::Loaded { value: 42 })
        };

        assert!(matches!(effect, Effect::Future(_)));
    }

    #[test]
    fn test_delay_macro() {
        let effect = delay! {
            duration: Duration::from_secs(1),
            action: TestAction::Tick
        };

        assert!(matches!(effect, Effect::Delay { .. }));
    }

    #[test]
    fn test_cancellable_macro_wraps_inner_effect() {
        let effect = cancellable! {
            id: EffectId::new("tick"),
            effect: delay! {
                duration: Duration::from_secs(1),
                action: TestAction::Tick
            }
        };

        match effect {
            Effect::Cancellable { id, effect } => {
                assert_eq!(id, EffectId::new("tick"));
                assert!(matches!(*effect, Effect::Delay { .. }));
            },
            other => unreachable!("expected Cancellable, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_async_effect_runs_body() {
        let effect = async_effect! {
            Some(TestAction::Loaded { value: 7 })
        };

        let Effect::Future(fut) = effect else {
            unreachable!("async_effect! always builds a Future");
        };
        assert!(matches!(fut.await, Some(TestAction::Loaded { value: 7 })));
    }
}
