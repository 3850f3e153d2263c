//! Kubernetes API groups, versions and kinds the CLI works with.

// ─── Spin operator ─────────────────────────────────────────────────────────

/// `apiVersion` of the `SpinApp` custom resource.
pub const SPINAPP_API_VERSION: &str = "core.spinoperator.dev/v1alpha1";

pub const SPINAPP_KIND: &str = "SpinApp";

/// Plural resource name used in API paths.
pub const SPINAPP_RESOURCE: &str = "spinapps";

/// Label the operator puts on every pod it creates for an app.
pub const APP_NAME_LABEL: &str = "core.spinoperator.dev/app-name";

// ─── Core / autoscaling ────────────────────────────────────────────────────

pub const SECRET_API_VERSION: &str = "v1";
pub const SECRET_KIND: &str = "Secret";

pub const HPA_API_VERSION: &str = "autoscaling/v2";
pub const HPA_KIND: &str = "HorizontalPodAutoscaler";

/// The operator materialises a `SpinApp` as a `Deployment`; the HPA targets it.
pub const DEPLOYMENT_API_VERSION: &str = "apps/v1";
pub const DEPLOYMENT_KIND: &str = "Deployment";

// ─── KEDA ──────────────────────────────────────────────────────────────────

pub const SCALED_OBJECT_API_VERSION: &str = "keda.sh/v1alpha1";
pub const SCALED_OBJECT_KIND: &str = "ScaledObject";

// ─── Server-side apply ─────────────────────────────────────────────────────

/// Field manager name sent with every server-side apply request.
pub const FIELD_MANAGER: &str = "spin-kube";

/// Content type for server-side apply patches.
pub const APPLY_PATCH_CONTENT_TYPE: &str = "application/apply-patch+yaml";
