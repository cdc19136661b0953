use super::store::ArtifactStorage;
use std::sync::Arc;

/// Used to track adapter identifiers.
pub trait Identity {
    fn id(&self) -> &'static str;
}

impl<T> Identity for Arc<T>
where
    T: Identity,
{
    fn id(&self) -> &'static str {
        <T as Identity>::id(self)
    }
}

macro_rules! impl_identity {
    ($($t:ident),+) => {
        $(
            impl Identity for Arc<dyn $t + Send + Sync> {
                fn id(&self) -> &'static str {
                    <dyn $t as Identity>::id(self.as_ref())
                }
            }
        )+
    };
}

impl_identity!(ArtifactStorage);
