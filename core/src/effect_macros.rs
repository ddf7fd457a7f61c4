//! Declarative macros for ergonomic effect construction
//!
//! These macros reduce boilerplate when a reducer hands a remote call to the
//! runtime and wants its outcome fed back as an action.

/// Create an `Effect::Future` from an async block
///
/// # Example
///
/// ```rust,ignore
/// use typebind_core::async_effect;
///
/// async_effect! {
///     let value = fetch().await;
///     Some(Action::Fetched { value })
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

/// Create an `Effect::Future` that awaits a fallible call and feeds its
/// whole outcome back through a single action constructor
///
/// The call expression is evaluated inside the spawned future, so anything
/// it borrows must be moved in (clone `Arc`s before invoking the macro).
///
/// # Example
///
/// ```rust,ignore
/// use typebind_core::request_effect;
///
/// let client = Arc::clone(&env.client);
/// request_effect! {
///     call: client.bind_type(request),
///     on_settled: AddTypeAction::BindTypeResponded
/// }
/// ```
#[macro_export]
macro_rules! request_effect {
    (
        call: $call:expr,
        on_settled: $on_settled:expr
    ) => {
        $crate::async_effect! {
            let outcome = $call.await;
            ::std::option::Option::Some(($on_settled)(outcome))
        }
    };
}
