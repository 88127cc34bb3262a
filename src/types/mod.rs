// ABOUTME: Type-safe resource names and validated domain identifiers.
// ABOUTME: Uses phantom types so bucket, object, and operation names cannot be mixed up.

mod deployable_name;
mod function_name;
mod id;
mod project_id;

pub use deployable_name::{DeployableName, DeployableNameError};
pub use function_name::{FunctionName, ParseFunctionNameError};
pub use id::{BucketName, ObjectName, OperationName, ResourceName};
pub use project_id::{ProjectId, ProjectIdError};
