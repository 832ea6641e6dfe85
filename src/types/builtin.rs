//! Built-in resource kinds.

use super::{Naming, ResourceType, WireFormat};

const CORE_V2: &str = "core/v2";
const SECRETS_V1: &str = "secrets/v1";

/// Assets (`Asset`).
pub static ASSET: ResourceType =
    ResourceType::namespaced("Asset", CORE_V2, "/api/core/v2/namespaces/{namespace}/assets")
        .with_field_prefix("asset");

/// Check configurations (`CheckConfig`).
pub static CHECK: ResourceType =
    ResourceType::namespaced("CheckConfig", CORE_V2, "/api/core/v2/namespaces/{namespace}/checks")
        .with_field_prefix("check");

/// Entities (`Entity`).
pub static ENTITY: ResourceType =
    ResourceType::namespaced("Entity", CORE_V2, "/api/core/v2/namespaces/{namespace}/entities")
        .with_field_prefix("entity");

/// Events (`Event`), named `<entity>/<check>`.
pub static EVENT: ResourceType =
    ResourceType::namespaced("Event", CORE_V2, "/api/core/v2/namespaces/{namespace}/events")
        .with_field_prefix("event")
        .with_naming(Naming::Event);

/// Event filters (`EventFilter`).
pub static FILTER: ResourceType =
    ResourceType::namespaced("EventFilter", CORE_V2, "/api/core/v2/namespaces/{namespace}/filters")
        .with_field_prefix("filter");

/// Handlers (`Handler`).
pub static HANDLER: ResourceType =
    ResourceType::namespaced("Handler", CORE_V2, "/api/core/v2/namespaces/{namespace}/handlers")
        .with_field_prefix("handler");

/// Hooks (`HookConfig`).
pub static HOOK: ResourceType =
    ResourceType::namespaced("HookConfig", CORE_V2, "/api/core/v2/namespaces/{namespace}/hooks")
        .with_field_prefix("hook");

/// Mutators (`Mutator`). No field selector prefix.
pub static MUTATOR: ResourceType =
    ResourceType::namespaced("Mutator", CORE_V2, "/api/core/v2/namespaces/{namespace}/mutators");

/// Secrets (`Secret`, enterprise).
pub static SECRET: ResourceType = ResourceType::namespaced(
    "Secret",
    SECRETS_V1,
    "/api/enterprise/secrets/v1/namespaces/{namespace}/secrets",
)
.with_field_prefix("secret")
.with_format(WireFormat::Envelope);

/// Silencing entries (`Silenced`).
pub static SILENCE: ResourceType =
    ResourceType::namespaced("Silenced", CORE_V2, "/api/core/v2/namespaces/{namespace}/silenced")
        .with_field_prefix("silenced");

/// Namespaces.
pub static NAMESPACE: ResourceType =
    ResourceType::cluster("Namespace", CORE_V2, "/api/core/v2/namespaces")
        .with_format(WireFormat::NameOnly);

/// Secrets providers (enterprise). The type (e.g. `VaultProvider`) is
/// supplied by the caller on create.
pub static SECRETS_PROVIDER: ResourceType =
    ResourceType::cluster("", SECRETS_V1, "/api/enterprise/secrets/v1/providers")
        .with_field_prefix("provider")
        .with_format(WireFormat::Envelope);

/// Users (`User`), named by `username`. Users cannot be deleted.
pub static USER: ResourceType = ResourceType::cluster("User", CORE_V2, "/api/core/v2/users")
    .with_field_prefix("user")
    .with_format(WireFormat::Bare)
    .with_naming(Naming::User)
    .undeletable();
