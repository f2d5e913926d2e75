// src/rt.rs

//! Runtime utilities for generated code (macros).
//! Do not use directly.

use std::sync::Arc;

use crate::arity::{Arity0, Arity1, Arity2};
use crate::codec::SharedCodec;
use crate::identity::TypeIdentity;

// The set_* calls below run on builders that were created inside the same
// expression, so the slots are provably unset and cannot conflict.

/// Builds a fully configured nullary registration against the global registry.
pub fn build_arity0<T: 'static>(ctor: fn() -> T, identity: TypeIdentity) -> Arc<Arity0<T>> {
    let registration = Arity0::new(ctor);
    registration
        .set_identity(identity)
        .expect("freshly created registration cannot hold a conflicting identity");
    registration
}

/// Builds a fully configured single-field registration against the global registry.
pub fn build_arity1<T: 'static, A: 'static>(
    ctor: fn(A) -> T,
    extract: fn(&T) -> &A,
    identity: TypeIdentity,
    field: SharedCodec<A>,
) -> Arc<Arity1<T, A>> {
    let registration = Arity1::new(ctor, extract);
    registration
        .set_components(field)
        .expect("freshly created registration cannot hold conflicting components");
    registration
        .set_identity(identity)
        .expect("freshly created registration cannot hold a conflicting identity");
    registration
}

/// Builds a fully configured two-field registration against the global registry.
pub fn build_arity2<T: 'static, A: 'static, B: 'static>(
    ctor: fn(A, B) -> T,
    extract: fn(&T) -> (&A, &B),
    identity: TypeIdentity,
    first: SharedCodec<A>,
    second: SharedCodec<B>,
) -> Arc<Arity2<T, A, B>> {
    let registration = Arity2::new(ctor, extract);
    registration
        .set_components(first, second)
        .expect("freshly created registration cannot hold conflicting components");
    registration
        .set_identity(identity)
        .expect("freshly created registration cannot hold a conflicting identity");
    registration
}

/// Coerces a nullary builder into its codec form.
pub fn arity0_codec<T: 'static>(registration: &Arc<Arity0<T>>) -> SharedCodec<T> {
    registration.clone()
}

/// Coerces a single-field builder into its codec form.
pub fn arity1_codec<T: 'static, A: 'static>(registration: &Arc<Arity1<T, A>>) -> SharedCodec<T> {
    registration.clone()
}

/// Coerces a two-field builder into its codec form.
pub fn arity2_codec<T: 'static, A: 'static, B: 'static>(
    registration: &Arc<Arity2<T, A, B>>,
) -> SharedCodec<T> {
    registration.clone()
}
