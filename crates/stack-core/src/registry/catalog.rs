//! The shipped option catalog
//!
//! Flat static tables, one per category. Adding an option here (and, if it
//! constrains anything, a rule in `rules::table`) is the whole change.

use super::OptionDef;
use crate::category::Category;

const fn opt(
    id: &'static str,
    label: &'static str,
    hint: &'static str,
    default: bool,
    sort_order: u8,
    group: Option<&'static str>,
) -> OptionDef {
    OptionDef {
        id,
        label,
        hint,
        default,
        sort_order,
        group,
    }
}

const FRONTEND: &[OptionDef] = &[
    opt(
        "tanstack-router",
        "TanStack Router",
        "Type-safe file-based routing for React",
        true,
        0,
        Some("web"),
    ),
    opt(
        "react-router",
        "React Router",
        "Declarative routing for React",
        false,
        1,
        Some("web"),
    ),
    opt(
        "tanstack-start",
        "TanStack Start",
        "Full-stack React with SSR and streaming",
        false,
        2,
        Some("web"),
    ),
    opt("next", "Next.js", "React framework with SSR", false, 3, Some("web")),
    opt("nuxt", "Nuxt", "Vue full-stack framework", false, 4, Some("web")),
    opt("svelte", "SvelteKit", "Svelte application framework", false, 5, Some("web")),
    opt("solid", "SolidJS", "Fine-grained reactive UI", false, 6, Some("web")),
    opt(
        "native-nativewind",
        "React Native (NativeWind)",
        "Expo app styled with NativeWind",
        false,
        7,
        Some("native"),
    ),
    opt(
        "native-unistyles",
        "React Native (Unistyles)",
        "Expo app styled with Unistyles",
        false,
        8,
        Some("native"),
    ),
    opt("none", "No frontend", "API-only project", false, 9, None),
];

const BACKEND: &[OptionDef] = &[
    opt("hono", "Hono", "Lightweight, ultrafast web framework", true, 0, None),
    opt("express", "Express", "Minimalist Node.js framework", false, 1, None),
    opt("fastify", "Fastify", "Fast, low-overhead Node.js framework", false, 2, None),
    opt("elysia", "Elysia", "Ergonomic Bun-first framework", false, 3, None),
    opt("next", "Next.js API routes", "Backend inside the Next.js app", false, 4, None),
    opt("convex", "Convex", "Reactive backend platform", false, 5, None),
    opt("none", "No backend", "Frontend-only project", false, 6, None),
];

const RUNTIME: &[OptionDef] = &[
    opt("bun", "Bun", "All-in-one JavaScript runtime", true, 0, None),
    opt("node", "Node.js", "Battle-tested JavaScript runtime", false, 1, None),
    opt("workers", "Cloudflare Workers", "Edge runtime deployed with Wrangler", false, 2, None),
    opt("none", "No runtime", "No server runtime", false, 3, None),
];

const DATABASE: &[OptionDef] = &[
    opt("sqlite", "SQLite", "File-based SQL (libSQL / Turso / D1)", true, 0, None),
    opt("postgres", "PostgreSQL", "Advanced open-source SQL database", false, 1, None),
    opt("mysql", "MySQL", "Popular open-source SQL database", false, 2, None),
    opt("mongodb", "MongoDB", "Document database", false, 3, None),
    opt("none", "No database", "Skip persistence entirely", false, 4, None),
];

const ORM: &[OptionDef] = &[
    opt("drizzle", "Drizzle", "TypeScript-first SQL ORM", true, 0, None),
    opt("prisma", "Prisma", "Schema-first ORM with generated client", false, 1, None),
    opt("mongoose", "Mongoose", "MongoDB object modeling", false, 2, None),
    opt("none", "No ORM", "Raw driver access", false, 3, None),
];

const API: &[OptionDef] = &[
    opt("trpc", "tRPC", "End-to-end typesafe RPC for React", true, 0, None),
    opt("orpc", "oRPC", "Typesafe RPC with OpenAPI output", false, 1, None),
    opt("none", "No API layer", "Plain HTTP handlers", false, 2, None),
];

const AUTH: &[OptionDef] = &[
    opt("better-auth", "Better-Auth", "Email/password and social sign-in", true, 0, None),
    opt("none", "No authentication", "Skip auth scaffolding", false, 1, None),
];

const DB_SETUP: &[OptionDef] = &[
    opt("none", "Manual setup", "Bring your own connection string", true, 0, None),
    opt("turso", "Turso", "Hosted libSQL", false, 1, None),
    opt("d1", "Cloudflare D1", "SQLite at the edge", false, 2, None),
    opt("neon", "Neon", "Serverless PostgreSQL", false, 3, None),
    opt("prisma-postgres", "Prisma Postgres", "PostgreSQL managed by Prisma", false, 4, None),
    opt("supabase", "Supabase", "PostgreSQL with a platform around it", false, 5, None),
    opt("mongodb-atlas", "MongoDB Atlas", "Hosted MongoDB", false, 6, None),
    opt("docker", "Docker Compose", "Local container for the database", false, 7, None),
];

const WEB_DEPLOY: &[OptionDef] = &[
    opt("none", "No deployment config", "Deploy however you like", true, 0, None),
    opt("workers", "Cloudflare Workers", "Wrangler config for the web app", false, 1, None),
];

const PACKAGE_MANAGER: &[OptionDef] = &[
    opt("npm", "npm", "Ships with Node.js", true, 0, None),
    opt("pnpm", "pnpm", "Fast, disk-efficient", false, 1, None),
    opt("bun", "bun", "Bundled with the Bun runtime", false, 2, None),
];

const ADDONS: &[OptionDef] = &[
    opt("turborepo", "Turborepo", "Task runner for the monorepo", true, 0, None),
    opt("biome", "Biome", "Formatter and linter", false, 1, None),
    opt("husky", "Husky", "Git hooks", false, 2, None),
    opt("pwa", "PWA", "Progressive web app manifest and service worker", false, 3, None),
    opt("tauri", "Tauri", "Desktop shell for the web frontend", false, 4, None),
    opt("starlight", "Starlight", "Documentation site", false, 5, None),
    opt("none", "No addons", "Keep it minimal", false, 6, None),
];

const EXAMPLES: &[OptionDef] = &[
    opt("todo", "Todo app", "CRUD example wired through the whole stack", true, 0, None),
    opt("ai", "AI chat", "Streaming chat example", false, 1, None),
    opt("none", "No examples", "Empty app shell", false, 2, None),
];

pub(super) fn options_for(category: Category) -> &'static [OptionDef] {
    match category {
        Category::Frontend => FRONTEND,
        Category::Backend => BACKEND,
        Category::Runtime => RUNTIME,
        Category::Database => DATABASE,
        Category::Orm => ORM,
        Category::Api => API,
        Category::Auth => AUTH,
        Category::DbSetup => DB_SETUP,
        Category::WebDeploy => WEB_DEPLOY,
        Category::PackageManager => PACKAGE_MANAGER,
        Category::Addons => ADDONS,
        Category::Examples => EXAMPLES,
    }
}
