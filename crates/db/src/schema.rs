use eyre::Result;
use sqlx::{Pool, Postgres};
use tracing::info;

/// Tables in creation order. Later tables reference earlier ones.
const TABLES: &[(&str, &str)] = &[
    (
        "users",
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id BIGSERIAL PRIMARY KEY,
            name VARCHAR(255) NOT NULL,
            email VARCHAR(255) NOT NULL UNIQUE,
            phone VARCHAR(20) NOT NULL,
            password_hash VARCHAR(255) NOT NULL,
            role VARCHAR(20) NOT NULL DEFAULT 'USER',
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    ),
    (
        "sessions",
        r#"
        CREATE TABLE IF NOT EXISTS sessions (
            token VARCHAR(128) PRIMARY KEY,
            user_id BIGINT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            expires_at TIMESTAMP WITH TIME ZONE NOT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    ),
    (
        "addresses",
        r#"
        CREATE TABLE IF NOT EXISTS addresses (
            id BIGSERIAL PRIMARY KEY,
            user_id BIGINT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            title VARCHAR(255) NOT NULL,
            location TEXT NOT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    ),
    (
        "stnks",
        r#"
        CREATE TABLE IF NOT EXISTS stnks (
            id BIGSERIAL PRIMARY KEY,
            user_id BIGINT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            photo_url TEXT NOT NULL,
            verified BOOLEAN NOT NULL DEFAULT FALSE,
            description TEXT NOT NULL DEFAULT '',
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    ),
    (
        "brands",
        r#"
        CREATE TABLE IF NOT EXISTS brands (
            id BIGSERIAL PRIMARY KEY,
            name VARCHAR(255) NOT NULL UNIQUE
        );
        "#,
    ),
    (
        "car_types",
        r#"
        CREATE TABLE IF NOT EXISTS car_types (
            id BIGSERIAL PRIMARY KEY,
            name VARCHAR(255) NOT NULL,
            brand_id BIGINT NOT NULL REFERENCES brands(id) ON DELETE CASCADE,
            CONSTRAINT unique_car_type_per_brand UNIQUE (brand_id, name)
        );
        "#,
    ),
    (
        "colors",
        r#"
        CREATE TABLE IF NOT EXISTS colors (
            id BIGSERIAL PRIMARY KEY,
            name VARCHAR(255) NOT NULL UNIQUE
        );
        "#,
    ),
    (
        "cars",
        r#"
        CREATE TABLE IF NOT EXISTS cars (
            id BIGSERIAL PRIMARY KEY,
            license_plate VARCHAR(20) NOT NULL UNIQUE,
            user_id BIGINT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            car_type_id BIGINT NOT NULL REFERENCES car_types(id),
            color_id BIGINT NOT NULL REFERENCES colors(id),
            frame_number VARCHAR(255) NULL,
            engine_number VARCHAR(255) NULL,
            kilometer BIGINT NOT NULL DEFAULT 0,
            photo_url TEXT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT valid_kilometer CHECK (kilometer >= 0)
        );
        "#,
    ),
    (
        "services",
        r#"
        CREATE TABLE IF NOT EXISTS services (
            id BIGSERIAL PRIMARY KEY,
            name VARCHAR(255) NOT NULL UNIQUE
        );
        "#,
    ),
    (
        "orders",
        r#"
        CREATE TABLE IF NOT EXISTS orders (
            id BIGSERIAL PRIMARY KEY,
            user_id BIGINT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            car_id BIGINT NOT NULL REFERENCES cars(id) ON DELETE CASCADE,
            service_type VARCHAR(50) NOT NULL,
            address TEXT NULL,
            order_time TIMESTAMP WITH TIME ZONE NOT NULL,
            duration INTEGER NOT NULL DEFAULT 1,
            price BIGINT NOT NULL DEFAULT 0,
            status VARCHAR(20) NOT NULL DEFAULT 'PENDING',
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT valid_duration CHECK (duration > 0),
            CONSTRAINT valid_price CHECK (price >= 0)
        );
        "#,
    ),
    (
        "order_services",
        r#"
        CREATE TABLE IF NOT EXISTS order_services (
            order_id BIGINT NOT NULL REFERENCES orders(id) ON DELETE CASCADE,
            service_id BIGINT NOT NULL REFERENCES services(id) ON DELETE CASCADE,
            PRIMARY KEY (order_id, service_id)
        );
        "#,
    ),
    (
        "categories",
        r#"
        CREATE TABLE IF NOT EXISTS categories (
            id BIGSERIAL PRIMARY KEY,
            name VARCHAR(255) NOT NULL UNIQUE
        );
        "#,
    ),
    (
        "tags",
        r#"
        CREATE TABLE IF NOT EXISTS tags (
            id BIGSERIAL PRIMARY KEY,
            name VARCHAR(255) NOT NULL UNIQUE
        );
        "#,
    ),
    (
        "articles",
        r#"
        CREATE TABLE IF NOT EXISTS articles (
            id BIGSERIAL PRIMARY KEY,
            user_id BIGINT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            category_id BIGINT NULL REFERENCES categories(id) ON DELETE SET NULL,
            photo_url TEXT NULL,
            title VARCHAR(255) NOT NULL,
            content TEXT NOT NULL,
            published BOOLEAN NOT NULL DEFAULT FALSE,
            publish_date TIMESTAMP WITH TIME ZONE NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    ),
    (
        "article_tags",
        r#"
        CREATE TABLE IF NOT EXISTS article_tags (
            article_id BIGINT NOT NULL REFERENCES articles(id) ON DELETE CASCADE,
            tag_id BIGINT NOT NULL REFERENCES tags(id) ON DELETE CASCADE,
            PRIMARY KEY (article_id, tag_id)
        );
        "#,
    ),
    (
        "vouchers",
        r#"
        CREATE TABLE IF NOT EXISTS vouchers (
            id BIGSERIAL PRIMARY KEY,
            name VARCHAR(255) NOT NULL,
            discount INTEGER NOT NULL,
            quantity INTEGER NOT NULL DEFAULT 0,
            point INTEGER NOT NULL DEFAULT 0,
            brand_id BIGINT NOT NULL REFERENCES brands(id) ON DELETE CASCADE,
            CONSTRAINT valid_quantity CHECK (quantity >= 0)
        );
        "#,
    ),
    (
        "transactions",
        r#"
        CREATE TABLE IF NOT EXISTS transactions (
            id BIGSERIAL PRIMARY KEY,
            customer_id BIGINT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            total_points BIGINT NOT NULL DEFAULT 0,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    ),
    (
        "voucher_redeems",
        r#"
        CREATE TABLE IF NOT EXISTS voucher_redeems (
            id BIGSERIAL PRIMARY KEY,
            voucher_id BIGINT NOT NULL REFERENCES vouchers(id),
            transaction_id BIGINT NOT NULL REFERENCES transactions(id) ON DELETE CASCADE,
            quantity INTEGER NOT NULL,
            total_points BIGINT NOT NULL
        );
        "#,
    ),
    (
        "inquiries",
        r#"
        CREATE TABLE IF NOT EXISTS inquiries (
            id BIGSERIAL PRIMARY KEY,
            car_brand VARCHAR(255) NOT NULL,
            car_year VARCHAR(20) NOT NULL,
            problem TEXT NOT NULL,
            phone VARCHAR(20) NOT NULL,
            resolved BOOLEAN NOT NULL DEFAULT FALSE,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    ),
    (
        "admin_emails",
        r#"
        CREATE TABLE IF NOT EXISTS admin_emails (
            id BIGSERIAL PRIMARY KEY,
            email VARCHAR(255) NOT NULL UNIQUE
        );
        "#,
    ),
];

const INDEXES: &[&str] = &[
    "CREATE INDEX IF NOT EXISTS idx_sessions_user_id ON sessions(user_id)",
    "CREATE INDEX IF NOT EXISTS idx_addresses_user_id ON addresses(user_id)",
    "CREATE INDEX IF NOT EXISTS idx_stnks_user_id ON stnks(user_id)",
    "CREATE INDEX IF NOT EXISTS idx_cars_user_id ON cars(user_id)",
    "CREATE INDEX IF NOT EXISTS idx_orders_order_time ON orders(order_time)",
    "CREATE INDEX IF NOT EXISTS idx_orders_user_id ON orders(user_id)",
    "CREATE INDEX IF NOT EXISTS idx_orders_car_id ON orders(car_id)",
    "CREATE INDEX IF NOT EXISTS idx_articles_category_id ON articles(category_id)",
    "CREATE INDEX IF NOT EXISTS idx_vouchers_brand_id ON vouchers(brand_id)",
    "CREATE INDEX IF NOT EXISTS idx_voucher_redeems_transaction_id ON voucher_redeems(transaction_id)",
];

pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");

    for (table, statement) in TABLES {
        tracing::debug!("Creating table {}", table);
        sqlx::query(statement).execute(pool).await?;
    }

    // One statement per query: prepared statements reject batches
    for statement in INDEXES {
        sqlx::query(statement).execute(pool).await?;
    }

    info!("Database schema initialized successfully.");
    Ok(())
}
