use pizzeria_domain::role::Role;
use pizzeria_shop::error::ShopServiceError;
use pizzeria_shop::usecase::account::{
    AuthenticateUseCase, CreateAdminUseCase, CreateDeliveryPersonInput,
    CreateDeliveryPersonUseCase, GetAccountUseCase, RegisterCustomerInput,
    RegisterCustomerUseCase,
};
use pizzeria_shop::usecase::users::{
    DeleteDeliveryPersonUseCase, DeleteUserUseCase, ListUsersUseCase,
};

use crate::helpers::{MockUserRepo, test_hasher};

fn customer_input(username: &str) -> RegisterCustomerInput {
    RegisterCustomerInput {
        username: username.to_owned(),
        password: "margherita".to_owned(),
        name: "Sam Baker".to_owned(),
        gender: "X".to_owned(),
        birth_date: String::new(),
        no_birth_date: true,
        address: "Dough Lane 4".to_owned(),
        postal_code: "6211AB".to_owned(),
    }
}

#[tokio::test]
async fn should_bootstrap_admin_once_and_let_it_log_in() {
    let repo = MockUserRepo::new();
    let bootstrap = CreateAdminUseCase {
        repo: repo.clone(),
        hasher: test_hasher(),
    };

    assert!(bootstrap.ensure("root", "hunter2").await.unwrap());
    assert!(!bootstrap.ensure("root", "other").await.unwrap());

    let auth = AuthenticateUseCase {
        repo: repo.clone(),
        hasher: test_hasher(),
    };
    let admin = auth.execute_as("root", "hunter2", Role::Admin).await.unwrap();
    assert_eq!(admin.role, Role::Admin);

    // The second ensure must not have replaced the password.
    let result = auth.execute("root", "other").await;
    assert!(matches!(result, Err(ShopServiceError::InvalidCredentials)));
}

#[tokio::test]
async fn should_register_customer_and_read_back_profile() {
    let repo = MockUserRepo::new();
    let register = RegisterCustomerUseCase {
        repo: repo.clone(),
        hasher: test_hasher(),
    };
    register.execute(customer_input("sam")).await.unwrap();

    let auth = AuthenticateUseCase {
        repo: repo.clone(),
        hasher: test_hasher(),
    };
    let user = auth.execute_as("sam", "margherita", Role::Customer).await.unwrap();

    let account = GetAccountUseCase { repo: repo.clone() }
        .execute(&user)
        .await
        .unwrap();
    assert_eq!(account.name, "Sam Baker");
    assert_eq!(account.birth_date, None);
    assert_eq!(account.postal_code, "6211AB");

    let again = register.execute(customer_input("sam")).await;
    assert!(matches!(again, Err(ShopServiceError::UsernameTaken)));
}

#[tokio::test]
async fn should_keep_roles_apart() {
    let repo = MockUserRepo::new();
    CreateDeliveryPersonUseCase {
        repo: repo.clone(),
        hasher: test_hasher(),
    }
    .execute(CreateDeliveryPersonInput {
        username: "rider".into(),
        password: "pedal".into(),
        name: "Robin".into(),
        vehicle_type: None,
    })
    .await
    .unwrap();

    let auth = AuthenticateUseCase {
        repo: repo.clone(),
        hasher: test_hasher(),
    };
    let rider = auth.execute_as("rider", "pedal", Role::Delivery).await.unwrap();

    let as_customer = auth.execute_as("rider", "pedal", Role::Customer).await;
    assert!(matches!(as_customer, Err(ShopServiceError::Forbidden)));

    let account = GetAccountUseCase { repo: repo.clone() }.execute(&rider).await;
    assert!(matches!(account, Err(ShopServiceError::CustomerNotFound)));

    let persons = repo.accounts.lock().unwrap().delivery_persons.clone();
    assert_eq!(persons[0].vehicle_type, "bike");
}

#[tokio::test]
async fn should_manage_users_from_admin_side() {
    let repo = MockUserRepo::new();
    let admin_id = CreateAdminUseCase {
        repo: repo.clone(),
        hasher: test_hasher(),
    }
    .execute("root", "hunter2")
    .await
    .unwrap();
    let customer_id = RegisterCustomerUseCase {
        repo: repo.clone(),
        hasher: test_hasher(),
    }
    .execute(customer_input("sam"))
    .await
    .unwrap();
    CreateDeliveryPersonUseCase {
        repo: repo.clone(),
        hasher: test_hasher(),
    }
    .execute(CreateDeliveryPersonInput {
        username: "rider".into(),
        password: "pedal".into(),
        name: "Robin".into(),
        vehicle_type: Some("scooter".into()),
    })
    .await
    .unwrap();

    let users = ListUsersUseCase { repo: repo.clone() }.execute().await.unwrap();
    let names: Vec<_> = users.iter().map(|u| u.username.as_str()).collect();
    assert_eq!(names, ["rider", "sam"]);

    let delete = DeleteUserUseCase { repo: repo.clone() };
    assert!(matches!(
        delete.execute(admin_id).await,
        Err(ShopServiceError::CannotDeleteAdmin)
    ));
    delete.execute(customer_id).await.unwrap();
    assert!(matches!(
        delete.execute(customer_id).await,
        Err(ShopServiceError::UserNotFound)
    ));

    let person_id = repo.accounts.lock().unwrap().delivery_persons[0].id;
    DeleteDeliveryPersonUseCase { repo: repo.clone() }
        .execute(person_id)
        .await
        .unwrap();

    let users = ListUsersUseCase { repo: repo.clone() }.execute().await.unwrap();
    assert!(users.is_empty());
}
