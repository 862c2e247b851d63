//! Demo fixtures: two login accounts, ten furniture products, and the six
//! categories the products belong to.
//!
//! Seeding is idempotent against a persistent store: a fixture whose unique
//! key already exists is skipped, everything else still goes in.

use chrono::{DateTime, Utc};

use mebel_auth::{NewUser, Role, UserAccount, UserStatus, hash_password};
use mebel_catalog::{
    Category, NewCategory, NewProduct, Product, ProductCategory, ProductUpdate, Unit,
};
use mebel_core::{CategoryId, ProductId};
use mebel_store::{StoreError, StoreResult};

use crate::app::services::AppServices;

/// Load the demo dataset into whatever stores the services carry.
///
/// Categories go in last so their cached product counts can be taken from
/// the already-inserted products.
pub async fn seed_demo_data(services: &AppServices) -> anyhow::Result<()> {
    let now = Utc::now();

    seed_users(services, now).await?;
    seed_products(services, now).await?;
    seed_categories(services, now).await?;

    tracing::info!("demo data seeded");
    Ok(())
}

fn skip_duplicate(result: StoreResult<()>, kind: &'static str, name: &str) -> anyhow::Result<()> {
    match result {
        Ok(()) => Ok(()),
        Err(StoreError::Duplicate { .. }) => {
            tracing::info!(kind, name, "fixture already present, skipping");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

async fn seed_users(services: &AppServices, now: DateTime<Utc>) -> anyhow::Result<()> {
    let fixtures = [
        (
            "Admin User",
            "admin",
            "admin123",
            "admin@furniture.com",
            "+6281234567890",
            Role::Admin,
        ),
        (
            "John Doe",
            "johndoe",
            "user123",
            "john@example.com",
            "+6281234567891",
            Role::User,
        ),
    ];

    for (name, username, password, email, phone, role) in fixtures {
        let account = UserAccount::create(
            NewUser {
                name: name.to_string(),
                username: username.to_string(),
                password_hash: hash_password(password)?,
                email: email.to_string(),
                phone: phone.to_string(),
                image_url: None,
                role: Some(role),
                status: Some(UserStatus::Active),
            },
            now,
        )?;
        skip_duplicate(services.users.insert(account).await, "user", username)?;
    }
    Ok(())
}

struct ProductFixture {
    name: &'static str,
    category: ProductCategory,
    description: &'static str,
    price: i64,
    stock: i64,
    unit: Unit,
    image_url: &'static str,
    rating: f64,
    sold: i64,
}

async fn seed_products(services: &AppServices, now: DateTime<Utc>) -> anyhow::Result<()> {
    for fixture in product_fixtures() {
        let mut product = Product::create(
            ProductId::new(),
            NewProduct {
                name: fixture.name.to_string(),
                category: fixture.category,
                description: fixture.description.to_string(),
                price: fixture.price,
                stock: fixture.stock,
                unit: Some(fixture.unit),
                image_url: Some(fixture.image_url.to_string()),
            },
            now,
        )?;
        product.apply_update(
            ProductUpdate {
                rating: Some(fixture.rating),
                sold: Some(fixture.sold),
                ..ProductUpdate::default()
            },
            now,
        )?;
        skip_duplicate(services.products.insert(product).await, "product", fixture.name)?;
    }
    Ok(())
}

async fn seed_categories(services: &AppServices, now: DateTime<Utc>) -> anyhow::Result<()> {
    let fixtures = [
        (
            "meja",
            "Berbagai jenis meja dengan desain modern dan klasik",
            "bi-table",
            "#FF6B6B",
        ),
        (
            "kursi",
            "Koleksi kursi nyaman untuk berbagai ruangan",
            "bi-chair",
            "#4ECDC4",
        ),
        (
            "lemari",
            "Lemari penyimpanan berkualitas tinggi",
            "bi-cabinet",
            "#45B7D1",
        ),
        (
            "rak",
            "Rak display dan penyimpanan yang fungsional",
            "bi-grid-1x2",
            "#FFA502",
        ),
        (
            "bufet",
            "Bufet modern untuk ruang makan dan keluarga",
            "bi-boxes",
            "#96CEB4",
        ),
        (
            "tempat tidur",
            "Tempat tidur nyaman dan berkualitas premium",
            "bi-bed",
            "#FFEAA7",
        ),
    ];

    for (name, description, icon, color) in fixtures {
        let mut category = Category::create(
            CategoryId::new(),
            NewCategory {
                name: name.to_string(),
                description: Some(description.to_string()),
                icon: Some(icon.to_string()),
                color: Some(color.to_string()),
            },
            now,
        )?;
        let count = services.products.count_in_category(&category.name).await?;
        category.set_product_count(count, now);
        skip_duplicate(services.categories.insert(category).await, "category", name)?;
    }
    Ok(())
}

fn product_fixtures() -> Vec<ProductFixture> {
    vec![
        ProductFixture {
            name: "Meja Makan Kayu Jati - Ukuran besar 100m²",
            category: ProductCategory::Meja,
            description: "Hadirkan nuansa mewah dan elegan di ruang makan Anda dengan Meja \
                          Makan Kayu Jati - Ukuran Besar 100m². Terbuat dari kayu jati pilihan \
                          yang terkenal kokoh, tahan lama, dan memiliki serat alami yang indah.",
            price: 3_400_000,
            stock: 12,
            unit: Unit::Unit,
            image_url: "https://images.unsplash.com/photo-1617806118233-18e1de247200?auto=format&fit=crop&w=800&q=60",
            rating: 4.9,
            sold: 121,
        },
        ProductFixture {
            name: "Sofa Minimalis - 3 Dudukan",
            category: ProductCategory::Kursi,
            description: "Sofa tiga dudukan dengan desain minimalis, ideal untuk ruang \
                          keluarga. Permukaan yang luas dan mudah dibersihkan menjadikannya \
                          praktis untuk berbagai suasana.",
            price: 5_000_000,
            stock: 4,
            unit: Unit::Unit,
            image_url: "https://images.unsplash.com/photo-1555041469-a586c61ea9bc?auto=format&fit=crop&w=800&q=60",
            rating: 4.7,
            sold: 75,
        },
        ProductFixture {
            name: "Meja Kopi Kayu Palet - Vintage",
            category: ProductCategory::Meja,
            description: "Meja kopi berbahan kayu palet dengan sentuhan vintage. Finishing \
                          glossy/matte menambah kesan elegan sekaligus mudah dibersihkan.",
            price: 900_000,
            stock: 20,
            unit: Unit::Unit,
            image_url: "https://images.unsplash.com/photo-1578898887932-57c54b52e45e?auto=format&fit=crop&w=800&q=60",
            rating: 4.6,
            sold: 50,
        },
        ProductFixture {
            name: "Kursi Santai Rotan - Desain ergonomis",
            category: ProductCategory::Kursi,
            description: "Kursi santai berbahan rotan alami dengan desain ergonomis untuk \
                          kenyamanan maksimal. Cocok untuk teras, balkon, atau ruang keluarga.",
            price: 1_200_000,
            stock: 8,
            unit: Unit::Unit,
            image_url: "https://images.unsplash.com/photo-1506439773649-6e0eb8cfb237?auto=format&fit=crop&w=800&q=60",
            rating: 4.8,
            sold: 89,
        },
        ProductFixture {
            name: "Rak Dinding Modern - Minimalis",
            category: ProductCategory::Rak,
            description: "Rak dinding dengan desain minimalis modern, terbuat dari kayu \
                          berkualitas tinggi. Ideal untuk menyimpan buku, hiasan, atau koleksi \
                          pribadi.",
            price: 750_000,
            stock: 29,
            unit: Unit::Unit,
            image_url: "https://images.unsplash.com/photo-1600585154526-990dced4db0d?auto=format&fit=crop&w=800&q=60",
            rating: 4.5,
            sold: 30,
        },
        ProductFixture {
            name: "Lemari Pakaian Kayu - 2 Pintu",
            category: ProductCategory::Lemari,
            description: "Lemari pakaian kayu solid dengan 2 pintu besar, kapasitas \
                          penyimpanan luas. Finishing natural dengan desain klasik yang \
                          timeless.",
            price: 4_200_000,
            stock: 15,
            unit: Unit::Unit,
            image_url: "https://images.unsplash.com/photo-1595428774223-ef52624120d2?auto=format&fit=crop&w=800&q=60",
            rating: 4.4,
            sold: 64,
        },
        ProductFixture {
            name: "Lampu Hias Gantung - Retro",
            category: ProductCategory::Rak,
            description: "Lampu hias gantung dengan desain retro yang unik. Memberikan \
                          pencahayaan hangat dan atmosfer nyaman di ruangan Anda.",
            price: 1_500_000,
            stock: 2,
            unit: Unit::Unit,
            image_url: "https://images.unsplash.com/photo-1513506003901-1e6a229e2d15?auto=format&fit=crop&w=800&q=60",
            rating: 4.4,
            sold: 25,
        },
        ProductFixture {
            name: "Kursi Makan Kayu - Set 4",
            category: ProductCategory::Kursi,
            description: "Set 4 kursi makan dari kayu jati dengan desain ergonomis dan \
                          nyaman. Cocok dipasangkan dengan meja makan keluarga.",
            price: 2_600_000,
            stock: 16,
            unit: Unit::Set,
            image_url: "https://images.unsplash.com/photo-1503602642458-232111445657?auto=format&fit=crop&w=800&q=60",
            rating: 4.8,
            sold: 45,
        },
        ProductFixture {
            name: "Bufet TV Minimalis",
            category: ProductCategory::Bufet,
            description: "Bufet TV dengan desain minimalis modern, dilengkapi laci dan rak \
                          terbuka. Cocok untuk ruang keluarga minimalis.",
            price: 2_900_000,
            stock: 0,
            unit: Unit::Unit,
            image_url: "https://images.unsplash.com/photo-1586023492125-27b2c045efd7?auto=format&fit=crop&w=800&q=60",
            rating: 4.2,
            sold: 18,
        },
        ProductFixture {
            name: "Tempat Tidur Queen Size",
            category: ProductCategory::TempatTidur,
            description: "Tempat tidur ukuran queen dengan rangka kayu solid. Desain elegan \
                          dengan headboard yang kokoh dan nyaman.",
            price: 6_700_000,
            stock: 4,
            unit: Unit::Unit,
            image_url: "https://images.unsplash.com/photo-1505693416388-ac5ce068fe85?auto=format&fit=crop&w=800&q=60",
            rating: 4.9,
            sold: 92,
        },
    ]
}
