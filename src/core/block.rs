use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

/// Identifies a single execution of a block within a workflow.
///
/// Used to namespace temporary artifact names so concurrent executions of
/// the same block never collide on the file system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecutionContext {
    execution_id: Uuid,
}

impl ExecutionContext {
    pub fn new(execution_id: Uuid) -> Self {
        Self { execution_id }
    }

    /// Context with a freshly generated execution ID.
    pub fn random() -> Self {
        Self {
            execution_id: Uuid::new_v4(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.execution_id
    }

    /// Prefix `name` with the execution ID, making it unique across
    /// executions.
    pub fn scoped_name(&self, name: &str) -> String {
        format!("{}_{name}", self.execution_id)
    }
}

/// Block category, used for display in block listings.
#[derive(Debug, Clone, Copy, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum BlockCategory {
    Multimedia,
}

/// Static description of a block.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BlockMeta {
    /// Stable block identifier.
    pub id: &'static str,

    /// Human readable description of what the block does.
    pub description: &'static str,

    pub category: BlockCategory,
}

/// A single pluggable node in a workflow.
///
/// Blocks always complete; every failure is translated into the output's
/// error channel and never propagated to the surrounding platform.
#[async_trait::async_trait]
pub trait Block {
    type Input: Send;
    type Output: Send;

    fn meta(&self) -> BlockMeta;

    async fn run(&self, ctx: &ExecutionContext, input: Self::Input) -> Self::Output;
}
