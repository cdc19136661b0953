#[cfg(test)]
#[suitest::suite(import_tests)]
#[suitest::suite_cfg(sequential = true)]
mod import_service_tests {
    use crate::{
        app::store::{FsImageStore, TokioDirectory},
        core::{
            block::ExecutionContext,
            image::{ImageFile, StoredImage},
            provider::Identity,
            service::import::{ImageImportService, ImportServiceFactory, NO_IMAGES_MESSAGE},
            store::{external::ImageSource, ArtifactStorage},
        },
        err,
        error::{GrabbitErr, GrabbitError},
        map_err,
    };
    use std::{collections::HashMap, path::PathBuf, sync::Arc};
    use suitest::{after_all, before_all, cleanup};
    use tokio::io::{AsyncWrite, AsyncWriteExt};

    const TEST_STORE_PATH: &str = "__import_service_test_store__";
    const TEST_SCRATCH_PATH: &str = "__import_service_test_scratch__";

    pub struct TestState {
        factory: ImportServiceFactory,
    }

    #[before_all]
    async fn setup() -> TestState {
        let _ = tokio::fs::remove_dir_all(TEST_STORE_PATH).await;
        let _ = tokio::fs::remove_dir_all(TEST_SCRATCH_PATH).await;

        let storage = Arc::new(FsImageStore::new(TEST_STORE_PATH).await);
        let scratch = TokioDirectory::new(TEST_SCRATCH_PATH).await;

        let test_state = TestState {
            factory: ImportServiceFactory::new(storage, scratch.base().to_path_buf()),
        };
        test_state
    }

    #[cleanup]
    async fn cleanup() {
        let _ = tokio::fs::remove_dir_all(TEST_STORE_PATH).await;
        let _ = tokio::fs::remove_dir_all(TEST_SCRATCH_PATH).await;
    }

    #[after_all]
    async fn teardown() {
        let _ = tokio::fs::remove_dir_all(TEST_STORE_PATH).await;
        let _ = tokio::fs::remove_dir_all(TEST_SCRATCH_PATH).await;
    }

    /// Serves canned listings and chunk sequences in place of the Drive API.
    struct MockDrive {
        images: Vec<ImageFile>,
        chunks: HashMap<String, Vec<Vec<u8>>>,
        fail_on: Option<String>,
    }

    impl MockDrive {
        fn new(images: Vec<ImageFile>) -> Self {
            Self {
                images,
                chunks: HashMap::new(),
                fail_on: None,
            }
        }

        fn with_chunks(mut self, id: &str, chunks: Vec<Vec<u8>>) -> Self {
            self.chunks.insert(id.to_string(), chunks);
            self
        }

        fn failing_on(mut self, id: &str) -> Self {
            self.fail_on = Some(id.to_string());
            self
        }
    }

    impl Identity for MockDrive {
        fn id(&self) -> &'static str {
            "mock"
        }
    }

    #[async_trait::async_trait]
    impl ImageSource for MockDrive {
        async fn list_images(&self, _folder_id: &str) -> Result<Vec<ImageFile>, GrabbitError> {
            Ok(self.images.clone())
        }

        async fn download<W>(&self, file_id: &str, sink: &mut W) -> Result<u64, GrabbitError>
        where
            W: AsyncWrite + Send + Unpin,
        {
            if self.fail_on.as_deref() == Some(file_id) {
                return err!(InvalidFile, "simulated mid-transfer failure for '{file_id}'");
            }

            let mut written = 0u64;

            for chunk in self.chunks.get(file_id).into_iter().flatten() {
                map_err!(sink.write_all(chunk).await);
                written += chunk.len() as u64;
            }

            Ok(written)
        }
    }

    fn image(id: &str, name: &str) -> ImageFile {
        ImageFile::new(id.into(), name.into(), "image/png".into(), None)
    }

    #[test]
    async fn imports_all_images_in_listing_order(state: TestState) {
        let source = MockDrive::new(vec![image("1", "a.png"), image("2", "b.png")])
            .with_chunks("1", vec![b"aaa".to_vec(), b"bb".to_vec()])
            .with_chunks("2", vec![b"cccc".to_vec()]);

        let service = state.factory.source(source);
        let ctx = ExecutionContext::random();

        let stored = service.import_folder(&ctx, "folder").await.unwrap();

        assert_eq!(2, stored.len());
        assert!(stored[0].as_str().ends_with(&ctx.scoped_name("a.png")));
        assert!(stored[1].as_str().ends_with(&ctx.scoped_name("b.png")));

        // Chunks were appended in order.
        let content = tokio::fs::read(stored[0].as_str()).await.unwrap();
        assert_eq!(b"aaabb".to_vec(), content);

        let content = tokio::fs::read(stored[1].as_str()).await.unwrap();
        assert_eq!(b"cccc".to_vec(), content);
    }

    #[test]
    async fn folder_without_images_raises(state: TestState) {
        let service = state.factory.source(MockDrive::new(vec![]));
        let ctx = ExecutionContext::random();

        let e = service.import_folder(&ctx, "folder").await.unwrap_err();

        match e.error {
            GrabbitErr::NoImages(message) => assert_eq!(NO_IMAGES_MESSAGE, message),
            e => panic!("unexpected error: {e}"),
        }
    }

    #[test]
    async fn empty_folder_id_is_rejected(state: TestState) {
        let service = state.factory.source(MockDrive::new(vec![image("1", "a.png")]));
        let ctx = ExecutionContext::random();

        let e = service.import_folder(&ctx, "").await.unwrap_err();

        assert!(matches!(e.error, GrabbitErr::InvalidParameter(_)));
    }

    #[test]
    async fn mid_transfer_failure_aborts_whole_import(state: TestState) {
        let source = MockDrive::new(vec![image("1", "a.png"), image("2", "b.png")])
            .with_chunks("1", vec![b"aaa".to_vec()])
            .failing_on("2");

        let service = state.factory.source(source);
        let ctx = ExecutionContext::random();

        let result = service.import_folder(&ctx, "folder").await;
        assert!(result.is_err());

        // The failed download's scratch artifact was cleaned up.
        let leftover = format!("{TEST_SCRATCH_PATH}/{}", ctx.scoped_name("b.png"));
        assert!(tokio::fs::metadata(&leftover).await.is_err());
    }

    /// Always refuses to persist artifacts.
    struct FailingStore;

    impl Identity for FailingStore {
        fn id(&self) -> &'static str {
            "failing"
        }
    }

    #[async_trait::async_trait]
    impl ArtifactStorage for FailingStore {
        async fn store(
            &self,
            _ctx: &ExecutionContext,
            _local_path: &str,
            _return_content: bool,
        ) -> Result<StoredImage, GrabbitError> {
            err!(InvalidFile, "simulated storage failure")
        }
    }

    #[test]
    async fn storage_failure_aborts_and_cleans_scratch(_state: TestState) {
        let source = MockDrive::new(vec![image("1", "a.png")])
            .with_chunks("1", vec![b"x".to_vec()]);

        let service = ImageImportService::new(
            Arc::new(FailingStore),
            PathBuf::from(TEST_SCRATCH_PATH),
            source,
        );

        let ctx = ExecutionContext::random();

        let e = service.import_folder(&ctx, "folder").await.unwrap_err();
        assert!(matches!(e.error, GrabbitErr::InvalidFile(_)));

        // The completed download never leaks out of the scratch directory.
        let leftover = format!("{TEST_SCRATCH_PATH}/{}", ctx.scoped_name("a.png"));
        assert!(tokio::fs::metadata(&leftover).await.is_err());
    }

    #[test]
    async fn same_name_across_executions_does_not_collide(state: TestState) {
        let ctx_a = ExecutionContext::random();
        let ctx_b = ExecutionContext::random();

        let source = || {
            MockDrive::new(vec![image("1", "a.png")])
                .with_chunks("1", vec![b"first".to_vec()])
        };

        let stored_a = state
            .factory
            .source(source())
            .import_folder(&ctx_a, "folder")
            .await
            .unwrap();

        let stored_b = state
            .factory
            .source(source())
            .import_folder(&ctx_b, "folder")
            .await
            .unwrap();

        assert_ne!(stored_a[0], stored_b[0]);

        assert!(tokio::fs::metadata(stored_a[0].as_str()).await.is_ok());
        assert!(tokio::fs::metadata(stored_b[0].as_str()).await.is_ok());
    }
}
