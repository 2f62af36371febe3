//! Reserved names of the persisted CUG layout

/// Mixin (marker trait) set on a node that carries a CUG policy
pub const MIX_REP_CUG_MIXIN: &str = "rep:CugMixin";

/// Name of the reserved child node holding the policy
pub const REP_CUG_POLICY: &str = "rep:cugPolicy";

/// Primary type of the reserved policy node
pub const NT_REP_CUG_POLICY: &str = "rep:CugPolicy";

/// Multi-valued string property listing the principal names
pub const REP_PRINCIPAL_NAMES: &str = "rep:principalNames";

/// Primary type of the root node
pub const NT_REP_ROOT: &str = "rep:root";

/// Primary type for plain content nodes
pub const NT_OAK_UNSTRUCTURED: &str = "oak:Unstructured";

/// Root of the system subtree, never eligible for CUG policies
pub const JCR_SYSTEM_PATH: &str = "/jcr:system";

/// Node type registry
pub const NODE_TYPES_PATH: &str = "/jcr:system/jcr:nodeTypes";

/// Subtrees excluded from CUG support regardless of configuration
pub const RESERVED_PATHS: &[&str] = &[JCR_SYSTEM_PATH];
