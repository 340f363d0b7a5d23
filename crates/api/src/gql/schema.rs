use async_graphql::dataloader::DataLoader;
use async_graphql::extensions::{Analyzer, Tracing};
use async_graphql::Schema;

use super::loaders::PersonLoader;
use super::{MutationRoot, QueryRoot, SubscriptionRoot};
use crate::config::GqlConfig;
use crate::state::AppState;

pub type AppSchema = Schema<QueryRoot, MutationRoot, SubscriptionRoot>;

/// Build the GraphQL schema and inject shared state (AppState) into the context.
pub fn build_schema(state: AppState, config: &GqlConfig) -> AppSchema {
    let person_loader = DataLoader::new(PersonLoader::new(state.db.clone()), tokio::spawn);

    let mut builder = Schema::build(
        QueryRoot::default(),
        MutationRoot,
        SubscriptionRoot,
    )
    .data(state) // AppState is Clone; available in resolvers via ctx.data::<AppState>()
    .data(person_loader)
    .limit_depth(config.max_depth);

    if config.analyze_complexity {
        builder = builder.limit_complexity(config.max_complexity);
    }
    if config.complexity_report {
        builder = builder.extension(Analyzer);
    }
    if config.tracing {
        builder = builder.extension(Tracing);
    }
    if !config.introspection {
        builder = builder.disable_introspection();
    }

    tracing::info!(
        analyze_complexity = config.analyze_complexity,
        max_complexity = config.max_complexity,
        max_depth = config.max_depth,
        "GraphQL schema built"
    );
    builder.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use infra::db::Db;

    #[test]
    fn sdl_exposes_relay_shapes() {
        let schema = build_schema(AppState::new(Db::new()), &GqlConfig::default());
        let sdl = schema.sdl();

        assert!(sdl.contains("interface Node"));
        assert!(sdl.contains("scalar Time"));
        assert!(sdl.contains("type PostConnection"));
        assert!(sdl.contains("clientMutationId: String"));
    }
}
