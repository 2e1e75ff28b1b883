//! # Turfbook Core
//!
//! Core traits and types for the turfbook booking client.
//!
//! Every screen transition, timer tick and remote-store round trip in the
//! client is modelled as an action reduced by a pure function:
//!
//! - **State**: everything the client renders (current screen, session, city)
//! - **Action**: user input and the results fed back by effects
//! - **Reducer**: `(State, Action, Environment) → (State, Effects)`
//! - **Effect**: a description of side work (remote call, delayed tick, cancellation)
//! - **Environment**: injected dependencies (clock, remote store, session store)
//!
//! The reducer never performs I/O. It returns effects, and the runtime crate
//! executes them and feeds resulting actions back in.
//!
//! ## Example
//!
//! ```ignore
//! use turfbook_core::*;
//!
//! impl Reducer for HoldReducer {
//!     type State = HoldState;
//!     type Action = HoldAction;
//!     type Environment = HoldEnvironment;
//!
//!     fn reduce(
//!         &self,
//!         state: &mut HoldState,
//!         action: HoldAction,
//!         env: &HoldEnvironment,
//!     ) -> SmallVec<[Effect<HoldAction>; 4]> {
//!         match action {
//!             HoldAction::Tick => {
//!                 state.remaining -= 1;
//!                 smallvec![delay! {
//!                     duration: env.tick,
//!                     action: HoldAction::Tick
//!                 }]
//!             }
//!         }
//!     }
//! }
//! ```

// Re-export commonly used types
pub use chrono::{DateTime, Utc};
pub use serde::{Deserialize, Serialize};
pub use smallvec::{smallvec, SmallVec};

/// Declarative macros for building effects
pub mod effect_macros;

/// Reducer module - the core trait for client logic
///
/// Reducers are pure functions: `(State, Action, Environment) → (State, Effects)`.
/// They hold every rule of the booking flow and are deterministic and testable.
pub mod reducer {
    use super::effect::Effect;
    use smallvec::SmallVec;

    /// The Reducer trait - core abstraction for client logic
    ///
    /// # Type Parameters
    ///
    /// - `State`: The state this reducer operates on
    /// - `Action`: The action type this reducer processes
    /// - `Environment`: The injected dependencies this reducer needs
    pub trait Reducer {
        /// The state type this reducer operates on
        type State;

        /// The action type this reducer processes
        type Action;

        /// The environment type with injected dependencies
        type Environment;

        /// Reduce an action into state changes and effects
        ///
        /// Updates `state` in place and returns effect descriptions for the
        /// runtime. Most actions produce zero or one effect, hence the inline
        /// capacity of four.
        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]>;
    }
}

/// Effect module - Side effect descriptions
///
/// Effects are values, not execution. The runtime decides how to run them.
pub mod effect {
    use futures::future::BoxFuture;
    use std::fmt;
    use std::time::Duration;

    /// Identifier under which a cancellable effect is registered
    ///
    /// Registering a second effect under the same id cancels the first one,
    /// so at most one effect per id is ever in flight.
    #[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
    pub struct EffectId(&'static str);

    impl EffectId {
        /// Create an id from a static name
        #[must_use]
        pub const fn new(name: &'static str) -> Self {
            Self(name)
        }
    }

    impl fmt::Display for EffectId {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(self.0)
        }
    }

    /// Effect type - describes a side effect to be executed
    ///
    /// Effects are NOT executed immediately. They are descriptions returned
    /// from reducers and executed by the Store runtime.
    ///
    /// # Type Parameters
    ///
    /// - `Action`: The action type that effects can produce (feedback loop)
    pub enum Effect<Action> {
        /// No-op effect
        None,

        /// Run effects in parallel
        Parallel(Vec<Effect<Action>>),

        /// Run effects sequentially
        Sequential(Vec<Effect<Action>>),

        /// Delayed action (ticks, timeouts)
        Delay {
            /// How long to wait
            duration: Duration,
            /// Action to dispatch after delay
            action: Box<Action>,
        },

        /// Arbitrary async computation
        ///
        /// Returns `Option<Action>` - if Some, the action is fed back into the reducer
        Future(BoxFuture<'static, Option<Action>>),

        /// Run `effect` registered under `id`, cancelling whatever was
        /// previously registered under the same id
        Cancellable {
            /// Registration id
            id: EffectId,
            /// The effect to run
            effect: Box<Effect<Action>>,
        },

        /// Cancel the effect registered under the id, if any
        Cancel(EffectId),
    }

    // Manual Debug implementation since Future doesn't implement Debug
    impl<Action> fmt::Debug for Effect<Action>
    where
        Action: fmt::Debug,
    {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            match self {
                Effect::None => write!(f, "Effect::None"),
                Effect::Parallel(effects) => {
                    f.debug_tuple("Effect::Parallel").field(effects).finish()
                },
                Effect::Sequential(effects) => {
                    f.debug_tuple("Effect::Sequential").field(effects).finish()
                },
                Effect::Delay { duration, action } => f
                    .debug_struct("Effect::Delay")
                    .field("duration", duration)
                    .field("action", action)
                    .finish(),
                Effect::Future(_) => write!(f, "Effect::Future(<future>)"),
                Effect::Cancellable { id, effect } => f
                    .debug_struct("Effect::Cancellable")
                    .field("id", id)
                    .field("effect", effect)
                    .finish(),
                Effect::Cancel(id) => f.debug_tuple("Effect::Cancel").field(id).finish(),
            }
        }
    }

    impl<Action> Effect<Action> {
        /// Chain effects to run sequentially
        #[must_use]
        pub const fn chain(effects: Vec<Effect<Action>>) -> Effect<Action> {
            Effect::Sequential(effects)
        }

        /// Register this effect under `id`, replacing any in-flight effect with that id
        #[must_use]
        pub fn cancellable(self, id: EffectId) -> Effect<Action> {
            Effect::Cancellable {
                id,
                effect: Box::new(self),
            }
        }

        /// The action carried by a `Delay`, looking through a `Cancellable` wrapper
        #[must_use]
        pub fn delayed_action(&self) -> Option<&Action> {
            match self {
                Effect::Delay { action, .. } => Some(action),
                Effect::Cancellable { effect, .. } => effect.delayed_action(),
                _ => None,
            }
        }

        /// True when this effect is a `Cancel` for `id`
        #[must_use]
        pub fn cancels(&self, id: &EffectId) -> bool {
            matches!(self, Effect::Cancel(cancelled) if cancelled == id)
        }
    }
}

/// Environment module - Dependency injection traits
///
/// All external dependencies are abstracted behind traits and injected
/// via the Environment parameter.
pub mod environment {
    use chrono::{DateTime, Utc};

    /// Clock trait - abstracts time operations for testability
    ///
    /// The booking window (today plus the following days) is computed from
    /// this clock, so tests can pin "today".
    pub trait Clock: Send + Sync {
        /// Get the current time
        fn now(&self) -> DateTime<Utc>;
    }

    /// Production clock backed by the system time
    #[derive(Debug, Clone, Copy, Default)]
    pub struct SystemClock;

    impl Clock for SystemClock {
        fn now(&self) -> DateTime<Utc> {
            Utc::now()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::effect::{Effect, EffectId};
    use std::time::Duration;

    #[derive(Debug, Clone, PartialEq)]
    enum Tick {
        Fired,
    }

    #[test]
    fn delayed_action_looks_through_cancellable() {
        let effect = Effect::Delay {
            duration: Duration::from_secs(1),
            action: Box::new(Tick::Fired),
        }
        .cancellable(EffectId::new("tick"));

        assert_eq!(effect.delayed_action(), Some(&Tick::Fired));
    }

    #[test]
    fn cancel_matches_only_its_id() {
        let effect: Effect<Tick> = Effect::Cancel(EffectId::new("tick"));

        assert!(effect.cancels(&EffectId::new("tick")));
        assert!(!effect.cancels(&EffectId::new("other")));
    }

    #[test]
    fn id_displays_its_name() {
        assert_eq!(EffectId::new("hold-timer").to_string(), "hold-timer");
    }
}
