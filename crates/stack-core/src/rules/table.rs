//! The shipped compatibility matrix
//!
//! Declared one-directional; `Excludes` is treated symmetric by the checker.
//! Declaration order matters in two places: violations are reported in table
//! order, and when two `DefaultsTo` (or `Requires`) rules target the same
//! category during resolution, the earlier one wins.

use super::{at, Rule, RuleKind};
use crate::category::Category::{self, *};

const fn excludes(
    when: (Category, &'static str),
    then: (Category, &'static str),
    reason: &'static str,
) -> Rule {
    Rule {
        kind: RuleKind::Excludes,
        when: at(when.0, when.1),
        then: at(then.0, then.1),
        reason,
    }
}

const fn requires(
    when: (Category, &'static str),
    then: (Category, &'static str),
    reason: &'static str,
) -> Rule {
    Rule {
        kind: RuleKind::Requires,
        when: at(when.0, when.1),
        then: at(then.0, then.1),
        reason,
    }
}

const fn defaults_to(
    when: (Category, &'static str),
    then: (Category, &'static str),
    reason: &'static str,
) -> Rule {
    Rule {
        kind: RuleKind::DefaultsTo,
        when: at(when.0, when.1),
        then: at(then.0, then.1),
        reason,
    }
}

pub(super) const RULES: &[Rule] = &[
    // ORM / database pairing
    excludes((Orm, "drizzle"), (Database, "mongodb"), "Drizzle has no MongoDB dialect"),
    excludes((Orm, "drizzle"), (Database, "none"), "an ORM needs a database"),
    excludes((Orm, "prisma"), (Database, "none"), "an ORM needs a database"),
    excludes((Orm, "mongoose"), (Database, "none"), "an ORM needs a database"),
    requires((Orm, "mongoose"), (Database, "mongodb"), "Mongoose only speaks MongoDB"),

    // Auth and examples need somewhere to store their data
    excludes((Auth, "better-auth"), (Database, "none"), "Better-Auth stores sessions in the database"),
    excludes((Examples, "todo"), (Database, "none"), "the todo example persists its items"),

    // Hosted database setups pin the database engine
    requires((DbSetup, "turso"), (Database, "sqlite"), "Turso is hosted libSQL"),
    requires((DbSetup, "d1"), (Database, "sqlite"), "D1 is SQLite at the edge"),
    requires((DbSetup, "d1"), (Runtime, "workers"), "D1 bindings only exist on Workers"),
    requires((DbSetup, "neon"), (Database, "postgres"), "Neon is serverless PostgreSQL"),
    requires((DbSetup, "prisma-postgres"), (Database, "postgres"), "Prisma Postgres is PostgreSQL"),
    requires((DbSetup, "supabase"), (Database, "postgres"), "Supabase runs on PostgreSQL"),
    requires((DbSetup, "mongodb-atlas"), (Database, "mongodb"), "Atlas is hosted MongoDB"),
    excludes((DbSetup, "docker"), (Database, "none"), "there is no database to containerize"),
    excludes((DbSetup, "docker"), (Runtime, "workers"), "Workers cannot reach a local container"),

    // Cloudflare Workers narrows the stack
    requires((Runtime, "workers"), (Backend, "hono"), "only Hono targets the Workers runtime"),
    excludes((Database, "mongodb"), (Runtime, "workers"), "the MongoDB driver needs a TCP socket"),
    requires((WebDeploy, "workers"), (Runtime, "workers"), "Wrangler deploys the Workers runtime"),
    defaults_to((Runtime, "workers"), (Database, "sqlite"), "D1 is the native Workers database"),
    defaults_to((Runtime, "workers"), (Orm, "drizzle"), "Drizzle ships a D1 driver"),
    defaults_to((Runtime, "workers"), (DbSetup, "d1"), "D1 is the native Workers database"),

    // tRPC's client bindings are React-only
    excludes((Api, "trpc"), (Frontend, "nuxt"), "tRPC bindings require a React client"),
    excludes((Api, "trpc"), (Frontend, "svelte"), "tRPC bindings require a React client"),
    excludes((Api, "trpc"), (Frontend, "solid"), "tRPC bindings require a React client"),
    defaults_to((Frontend, "nuxt"), (Api, "orpc"), "oRPC has first-class Vue support"),
    defaults_to((Frontend, "svelte"), (Api, "orpc"), "oRPC has first-class Svelte support"),
    defaults_to((Frontend, "solid"), (Api, "orpc"), "oRPC has first-class Solid support"),

    // No database: drop everything that depends on one
    defaults_to((Database, "none"), (Orm, "none"), "no database, no ORM"),
    defaults_to((Database, "none"), (Auth, "none"), "auth needs a session store"),
    defaults_to((Database, "none"), (Examples, "none"), "the examples persist data"),
    defaults_to((Database, "mongodb"), (Orm, "prisma"), "Prisma is the default MongoDB client"),

    // Convex replaces the server stack wholesale
    defaults_to((Backend, "convex"), (Runtime, "none"), "Convex hosts its own functions"),
    defaults_to((Backend, "convex"), (Database, "none"), "Convex is the database"),
    defaults_to((Backend, "convex"), (Orm, "none"), "Convex is the database"),
    defaults_to((Backend, "convex"), (Api, "none"), "Convex clients talk to Convex directly"),
    defaults_to((Backend, "convex"), (Auth, "none"), "Convex ships its own auth"),
    excludes((Backend, "convex"), (Api, "trpc"), "Convex clients talk to Convex directly"),
    excludes((Backend, "convex"), (Api, "orpc"), "Convex clients talk to Convex directly"),
    excludes((Backend, "convex"), (Auth, "better-auth"), "Convex ships its own auth"),
    excludes((Backend, "convex"), (Database, "sqlite"), "Convex is the database"),
    excludes((Backend, "convex"), (Database, "postgres"), "Convex is the database"),
    excludes((Backend, "convex"), (Database, "mysql"), "Convex is the database"),
    excludes((Backend, "convex"), (Database, "mongodb"), "Convex is the database"),
    excludes((Backend, "convex"), (Orm, "drizzle"), "Convex is the database"),
    excludes((Backend, "convex"), (Orm, "prisma"), "Convex is the database"),
    excludes((Backend, "convex"), (Orm, "mongoose"), "Convex is the database"),

    // Frontend-only projects have no server side to configure
    defaults_to((Backend, "none"), (Runtime, "none"), "no backend, no server runtime"),
    defaults_to((Backend, "none"), (Database, "none"), "no backend, no database"),
    defaults_to((Backend, "none"), (Orm, "none"), "no backend, no ORM"),
    defaults_to((Backend, "none"), (Api, "none"), "no backend, no API layer"),
    defaults_to((Backend, "none"), (Auth, "none"), "no backend, no auth server"),
    defaults_to((Backend, "none"), (Examples, "none"), "the examples need a backend"),
    excludes((Backend, "none"), (Api, "trpc"), "an API layer needs a backend"),
    excludes((Backend, "none"), (Api, "orpc"), "an API layer needs a backend"),
    excludes((Backend, "none"), (Auth, "better-auth"), "the auth server needs a backend"),
    excludes((Backend, "none"), (Database, "sqlite"), "a database needs a backend to query it"),
    excludes((Backend, "none"), (Database, "postgres"), "a database needs a backend to query it"),
    excludes((Backend, "none"), (Database, "mysql"), "a database needs a backend to query it"),
    excludes((Backend, "none"), (Database, "mongodb"), "a database needs a backend to query it"),
    excludes((Backend, "none"), (Examples, "todo"), "the todo example needs a backend"),
    excludes((Backend, "none"), (Examples, "ai"), "the AI example needs a backend"),

    // Example-specific gaps
    excludes((Examples, "ai"), (Backend, "elysia"), "the AI example's streaming routes are not wired for Elysia"),
];
