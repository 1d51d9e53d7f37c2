mod test_support;

use remedial_service::bootstrap::initialize_admin_user;
use remedial_service::entities::user;
use sea_orm::{EntityTrait, PaginatorTrait};
use test_support::setup_test_db;

#[tokio::test]
async fn admin_is_created_once() {
    let db = setup_test_db().await;

    initialize_admin_user(&db, "admin", "s3cret").await.unwrap();
    initialize_admin_user(&db, "admin", "ignored").await.unwrap();

    assert_eq!(user::Entity::find().count(&db).await.unwrap(), 1);

    let admin = user::Entity::find().one(&db).await.unwrap().unwrap();
    assert_eq!(admin.username, "admin");
    assert!(admin.is_staff);
    assert!(bcrypt::verify("s3cret", &admin.password).unwrap());
}
