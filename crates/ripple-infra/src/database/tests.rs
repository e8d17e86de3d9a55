#[cfg(test)]
mod tests {
    use crate::database::entity::{post, user};
    use crate::database::postgres_repo::{PostgresPostRepository, PostgresUserRepository};
    use ripple_core::domain::{Post, User};
    use ripple_core::ports::{BaseRepository, PostRepository, UserRepository};
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn post_model(title: &str) -> post::Model {
        let now = chrono::Utc::now();
        post::Model {
            id: uuid::Uuid::new_v4(),
            creator_id: uuid::Uuid::new_v4(),
            title: title.to_owned(),
            content: "Content".to_owned(),
            image_url: Some("images/test.png".to_owned()),
            created_at: now.into(),
            updated_at: now.into(),
        }
    }

    #[tokio::test]
    async fn test_find_post_by_id() {
        let model = post_model("Test Post");
        let post_id = model.id;

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![model]])
            .into_connection();

        let repo = PostgresPostRepository::new(db);

        let result: Option<Post> = repo.find_by_id(post_id).await.unwrap();

        assert!(result.is_some());
        let post = result.unwrap();
        assert_eq!(post.title, "Test Post");
        assert_eq!(post.id, post_id);
        assert_eq!(post.image_url.as_deref(), Some("images/test.png"));
    }

    #[tokio::test]
    async fn test_find_page_maps_rows() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![post_model("Newest"), post_model("Older")]])
            .into_connection();

        let repo = PostgresPostRepository::new(db);

        let page = repo.find_page(0, 2).await.unwrap();
        assert_eq!(page.len(), 2);
        assert_eq!(page[0].title, "Newest");
    }

    #[tokio::test]
    async fn test_find_user_by_email() {
        let now = chrono::Utc::now();
        let user_id = uuid::Uuid::new_v4();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![user::Model {
                id: user_id,
                email: "a@x.com".to_owned(),
                name: "A".to_owned(),
                password_hash: "hash".to_owned(),
                status: "I am new!".to_owned(),
                post_ids: vec![],
                created_at: now.into(),
                updated_at: now.into(),
            }]])
            .into_connection();

        let repo = PostgresUserRepository::new(db);

        let result: Option<User> = repo.find_by_email("a@x.com").await.unwrap();

        assert!(result.is_some());
        assert_eq!(result.unwrap().id, user_id);
    }
}
