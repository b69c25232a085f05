//! GraphQL schema over the data store

pub mod inputs;
pub mod mutation;
pub mod query;
pub mod scalars;
pub mod types;

use async_graphql::{extensions::Tracing, Context, EmptySubscription, Schema};

use crate::store::SharedStore;

pub use mutation::MutationRoot;
pub use query::QueryRoot;
pub use scalars::{MemberTypeIdGql, UuidScalar};

pub type ApiSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Build the schema once; it is immutable and shared by every request.
pub fn build_schema(store: SharedStore) -> ApiSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(store)
        .extension(Tracing)
        .finish()
}

pub(crate) fn store<'a>(ctx: &Context<'a>) -> async_graphql::Result<&'a SharedStore> {
    ctx.data::<SharedStore>()
}
