mod common;

#[cfg(test)]
pub mod db_tests {
    use chrono::{Duration, Utc};
    use sqlx::PgPool;

    use super::common::*;

    use tradehouse::common::*;
    use tradehouse::config::SecureDownloadConfig;
    use tradehouse::db::*;
    use tradehouse::models::*;
    use tradehouse::services::pagination::PageQuery;
    use tradehouse::services::{Mailer, PasswordManager, PinGate};

    const TIME_LIMIT: i64 = 1;

    #[sqlx::test(migrations = "./migrations", fixtures("seed"))]
    async fn test_fixture_integrity(pool: PgPool) {
        let fetched = get_product_by_id(&pool, get_seed_product_kit().id)
            .await
            .expect("Failed database query");
        assert_eq!(fetched, Some(get_seed_product_kit()));

        let fetched = get_banner_by_id(&pool, get_seed_banner_active().id)
            .await
            .expect("Failed database query");
        assert_eq!(fetched, Some(get_seed_banner_active()));

        let fetched = get_contact_by_id(&pool, get_seed_contact_office().id)
            .await
            .expect("Failed database query");
        assert_eq!(fetched, Some(get_seed_contact_office()));

        let fetched = get_product_by_id(&pool, id(SEED_UNKNOWN_ID))
            .await
            .expect("Failed database query");
        assert!(fetched.is_none());
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_from_pool(pool: PgPool) {
        let db = Database::from_pool(pool.clone());

        let row: (i32,) = sqlx::query_as("SELECT 1")
            .fetch_one(&db.pool)
            .await
            .expect("Failed to query database");
        assert_eq!(row.0, 1);

        pool.close().await;

        let result = sqlx::query_as::<_, (i32,)>("SELECT 1")
            .fetch_one(&db.pool)
            .await;
        assert!(result.is_err());
    }

    #[sqlx::test(migrations = "./migrations", fixtures("seed"))]
    async fn test_list_products_by_line(pool: PgPool) {
        let bike = list_products(&pool, Some(BusinessLine::BikeLpg))
            .await
            .expect("Failed to list products");
        assert_eq!(bike, vec![get_seed_product_kit(), get_seed_product_install()]);

        let furniture = list_products(&pool, Some(BusinessLine::FurnitureHouse))
            .await
            .expect("Failed to list products");
        assert_eq!(furniture, vec![get_seed_product_teak()]);

        let station = list_products(&pool, Some(BusinessLine::FillingStation))
            .await
            .expect("Failed to list products");
        assert!(station.is_empty());

        let all = list_products(&pool, None)
            .await
            .expect("Failed to list products");
        assert_eq!(all.len(), 3);
    }

    #[sqlx::test(migrations = "./migrations", fixtures("seed"))]
    async fn test_create_product_appends_position(pool: PgPool) {
        let data = ProductCreate {
            business_line: BusinessLine::BikeLpg,
            name: " Service plan ".to_string(),
            description: String::new(),
            price_label: Some("".to_string()),
            image_url: None,
            features: vec!["Yearly check".to_string()],
            position: None,
        }
        .normalized()
        .expect("Valid product rejected");

        let created = create_product(&pool, &data)
            .await
            .expect("Failed to create product");

        assert_eq!(created.name, "Service plan");
        assert_eq!(created.price_label, None);
        assert_eq!(created.position, 2);
        assert!(Utc::now() - created.created_at < Duration::seconds(TIME_LIMIT));

        let bike = list_products(&pool, Some(BusinessLine::BikeLpg))
            .await
            .expect("Failed to list products");
        assert_eq!(bike.last().map(|p| p.id), Some(created.id));
    }

    #[sqlx::test(migrations = "./migrations", fixtures("seed"))]
    async fn test_update_product_partial_and_clear(pool: PgPool) {
        let seed = get_seed_product_kit();
        let update = ProductUpdate {
            price_label: Some("".to_string()),
            image_url: Some("https://cdn.example.com/kit.jpg".to_string()),
            ..Default::default()
        }
        .normalized()
        .expect("Valid update rejected");

        let updated = update_product(&pool, seed.id, &update)
            .await
            .expect("Failed to update product")
            .expect("Seed product missing");

        assert_eq!(updated.name, seed.name);
        assert_eq!(updated.features, seed.features);
        assert_eq!(updated.price_label, None);
        assert_eq!(updated.image_url.as_deref(), Some("https://cdn.example.com/kit.jpg"));
        assert!(updated.edited_at > seed.edited_at);

        let missing = update_product(&pool, id(SEED_UNKNOWN_ID), &update)
            .await
            .expect("Failed to update product");
        assert!(missing.is_none());
    }

    #[sqlx::test(migrations = "./migrations", fixtures("seed"))]
    async fn test_delete_product(pool: PgPool) {
        let seed = get_seed_product_teak();

        assert!(delete_product(&pool, seed.id).await.expect("Failed to delete"));
        assert!(!delete_product(&pool, seed.id).await.expect("Failed to delete"));

        let fetched = get_product_by_id(&pool, seed.id)
            .await
            .expect("Failed database query");
        assert!(fetched.is_none());
    }

    #[sqlx::test(migrations = "./migrations", fixtures("seed"))]
    async fn test_banners_active_filter(pool: PgPool) {
        let active = list_banners(&pool, Some(BusinessLine::BikeLpg), true)
            .await
            .expect("Failed to list banners");
        assert_eq!(active, vec![get_seed_banner_active()]);

        let all = list_banners(&pool, Some(BusinessLine::BikeLpg), false)
            .await
            .expect("Failed to list banners");
        assert_eq!(all.len(), 2);
        assert!(all.iter().any(|b| !b.active));
    }

    #[sqlx::test(migrations = "./migrations", fixtures("seed"))]
    async fn test_reviews_published_filter(pool: PgPool) {
        let published = list_reviews(&pool, None, true)
            .await
            .expect("Failed to list reviews");
        assert_eq!(published.len(), 1);
        assert_eq!(published[0].author, "Ravi");

        let all = list_reviews(&pool, None, false)
            .await
            .expect("Failed to list reviews");
        // Newest first.
        assert_eq!(all[0].author, "Spam Bot");
        assert_eq!(all.len(), 2);
    }

    #[sqlx::test(migrations = "./migrations", fixtures("seed"))]
    async fn test_faq_search(pool: PgPool) {
        let hits = list_faqs(&pool, None, Some("  CARDS "))
            .await
            .expect("Failed to list faqs");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].question, "Do you accept cards?");

        // Matches the answer text too.
        let hits = list_faqs(&pool, None, Some("two hours"))
            .await
            .expect("Failed to list faqs");
        assert_eq!(hits.len(), 1);

        let hits = list_faqs(&pool, Some(BusinessLine::BikeLpg), Some("cards"))
            .await
            .expect("Failed to list faqs");
        assert!(hits.is_empty());

        let hits = list_faqs(&pool, None, Some("%"))
            .await
            .expect("Failed to list faqs");
        assert!(hits.is_empty());

        let hits = list_faqs(&pool, None, Some(""))
            .await
            .expect("Failed to list faqs");
        assert_eq!(hits.len(), 2);
    }

    #[sqlx::test(migrations = "./migrations", fixtures("seed"))]
    async fn test_milestones_follow_position(pool: PgPool) {
        let milestones = list_milestones(&pool)
            .await
            .expect("Failed to list milestones");
        let years: Vec<i32> = milestones.iter().map(|m| m.year).collect();
        assert_eq!(years, vec![2005, 2015]);

        // Moving the 2015 entry to the front wins over its later year.
        let opened = id("00000000-0000-0000-0007-000000000000");
        update_milestone(
            &pool,
            opened,
            &MilestoneUpdate {
                position: Some(-1),
                ..Default::default()
            },
        )
        .await
        .expect("Failed to update milestone")
        .expect("Seed milestone missing");

        let milestones = list_milestones(&pool)
            .await
            .expect("Failed to list milestones");
        let years: Vec<i32> = milestones.iter().map(|m| m.year).collect();
        assert_eq!(years, vec![2015, 2005]);

        let added = create_milestone(
            &pool,
            &MilestoneCreate {
                year: 1999,
                title: "Family trade".to_string(),
                description: String::new(),
                position: None,
            },
        )
        .await
        .expect("Failed to create milestone");
        let milestones = list_milestones(&pool)
            .await
            .expect("Failed to list milestones");
        assert_eq!(milestones.last().map(|m| m.id), Some(added.id));
    }

    #[sqlx::test(migrations = "./migrations", fixtures("seed"))]
    async fn test_reorder_videos(pool: PgPool) {
        let [a, b, c] = get_seed_video_ids();

        let reordered = reorder_videos(&pool, &[c, a, b])
            .await
            .expect("Failed to reorder videos");

        let order: Vec<_> = reordered.iter().map(|v| (v.id, v.position)).collect();
        assert_eq!(order, vec![(c, 0), (a, 1), (b, 2)]);
    }

    #[sqlx::test(migrations = "./migrations", fixtures("seed"))]
    async fn test_reorder_videos_rejects_partial_or_unknown(pool: PgPool) {
        let [a, b, c] = get_seed_video_ids();

        let result = reorder_videos(&pool, &[b, a]).await;
        assert!(matches!(result, Err(ResourceError::InvalidRequest(_))));

        let result = reorder_videos(&pool, &[a, a, b, c]).await;
        assert!(matches!(result, Err(ResourceError::InvalidRequest(_))));

        let result = reorder_videos(&pool, &[c, b, id(SEED_UNKNOWN_ID)]).await;
        assert!(matches!(result, Err(ResourceError::NotFound { .. })));

        // Nothing moved.
        let videos = list_videos(&pool, None)
            .await
            .expect("Failed to list videos");
        let order: Vec<_> = videos.iter().map(|v| v.id).collect();
        assert_eq!(order, vec![a, b, c]);
    }

    #[sqlx::test(migrations = "./migrations", fixtures("seed"))]
    async fn test_section_slug_lookup_and_conflict(pool: PgPool) {
        let seed = get_seed_section_showroom();

        let fetched = get_section_by_slug(&pool, "showroom")
            .await
            .expect("Failed database query");
        assert_eq!(fetched, Some(seed.clone()));

        let data = SectionCreate {
            business_line: BusinessLine::General,
            slug: "showroom".to_string(),
            title: "Duplicate".to_string(),
            body: String::new(),
            images: vec![],
            position: None,
        };
        let result = create_section(&pool, &data).await;
        assert!(matches!(
            result,
            Err(ResourceError::AlreadyExists {
                iden: Iden::Slug(_),
                ..
            })
        ));

        let other = create_section(
            &pool,
            &SectionCreate {
                slug: "warehouse".to_string(),
                ..data
            },
        )
        .await
        .expect("Failed to create section");

        let result = update_section(
            &pool,
            other.id,
            &SectionUpdate {
                slug: Some("showroom".to_string()),
                ..Default::default()
            },
        )
        .await;
        assert!(matches!(result, Err(ResourceError::AlreadyExists { .. })));
    }

    #[sqlx::test(migrations = "./migrations", fixtures("seed"))]
    async fn test_contact_update_clears_optional_field(pool: PgPool) {
        let seed = get_seed_contact_office();
        let update = ContactInfoUpdate {
            phone: Some("".to_string()),
            ..Default::default()
        };

        let updated = update_contact(&pool, seed.id, &update)
            .await
            .expect("Failed to update contact")
            .expect("Seed contact missing");
        assert_eq!(updated.phone, None);
        assert_eq!(updated.email, seed.email);
    }

    #[sqlx::test(migrations = "./migrations", fixtures("seed"))]
    async fn test_contact_keeps_one_channel(pool: PgPool) {
        let seed = get_seed_contact_office();
        let clear_both = ContactInfoUpdate {
            phone: Some("".to_string()),
            email: Some("".to_string()),
            ..Default::default()
        };

        let result = update_contact(&pool, seed.id, &clear_both).await;
        assert!(matches!(result, Err(ResourceError::InvalidRequest(_))));

        let unchanged = get_contact_by_id(&pool, seed.id)
            .await
            .expect("Failed database query");
        assert_eq!(unchanged, Some(get_seed_contact_office()));

        // Clearing them one request at a time hits the same wall.
        let clear_phone = ContactInfoUpdate {
            phone: Some("".to_string()),
            ..Default::default()
        };
        update_contact(&pool, seed.id, &clear_phone)
            .await
            .expect("Failed to update contact");
        let clear_email = ContactInfoUpdate {
            email: Some("".to_string()),
            ..Default::default()
        };
        let result = update_contact(&pool, seed.id, &clear_email).await;
        assert!(matches!(result, Err(ResourceError::InvalidRequest(_))));

        let row = get_contact_by_id(&pool, seed.id)
            .await
            .expect("Failed database query")
            .expect("Seed contact missing");
        assert_eq!(row.email, seed.email);
    }

    #[sqlx::test(migrations = "./migrations", fixtures("seed"))]
    async fn test_subscriber_duplicate(pool: PgPool) {
        let data = SubscriberCreate {
            email: " Second@Example.com ".to_string(),
        }
        .normalized()
        .expect("Valid email rejected");

        let result = add_subscriber(&pool, &data).await;
        assert!(matches!(
            result,
            Err(ResourceError::AlreadyExists {
                iden: Iden::Email(_),
                ..
            })
        ));

        let created = add_subscriber(
            &pool,
            &SubscriberCreate {
                email: "fourth@example.com".to_string(),
            },
        )
        .await
        .expect("Failed to add subscriber");
        assert_eq!(created.email, "fourth@example.com");
    }

    #[sqlx::test(migrations = "./migrations", fixtures("seed"))]
    async fn test_list_subscribers_paginated(pool: PgPool) {
        let page = PageQuery {
            page: Some(1),
            per_page: Some(2),
        }
        .page();
        let first = list_subscribers(&pool, page)
            .await
            .expect("Failed to list subscribers");

        assert_eq!(first.total, 3);
        assert_eq!(first.total_pages, 2);
        let emails: Vec<_> = first.items.iter().map(|s| s.email.as_str()).collect();
        assert_eq!(emails, vec!["third@example.com", "second@example.com"]);

        let page = PageQuery {
            page: Some(2),
            per_page: Some(2),
        }
        .page();
        let second = list_subscribers(&pool, page)
            .await
            .expect("Failed to list subscribers");
        assert_eq!(second.items.len(), 1);
        assert!(!second.has_next());
    }

    #[sqlx::test(migrations = "./migrations", fixtures("seed"))]
    async fn test_messages_unread_and_mark_read(pool: PgPool) {
        assert_eq!(count_unread_messages(&pool).await.expect("Failed to count"), 2);

        let unread = list_messages(&pool, PageQuery::default().page(), true)
            .await
            .expect("Failed to list messages");
        assert_eq!(unread.total, 2);
        assert_eq!(unread.items[0], get_seed_message_omar());

        let all = list_messages(&pool, PageQuery::default().page(), false)
            .await
            .expect("Failed to list messages");
        assert_eq!(all.total, 3);

        let seed = get_seed_message_omar();
        let marked = mark_message_read(&pool, seed.id, true)
            .await
            .expect("Failed to mark message")
            .expect("Seed message missing");
        assert!(marked.read);
        assert_eq!(count_unread_messages(&pool).await.expect("Failed to count"), 1);

        let missing = mark_message_read(&pool, id(SEED_UNKNOWN_ID), true)
            .await
            .expect("Failed to mark message");
        assert!(missing.is_none());
    }

    #[sqlx::test(migrations = "./migrations", fixtures("seed"))]
    async fn test_create_message(pool: PgPool) {
        let data = FormMessageCreate {
            name: "Lee".to_string(),
            email: "lee@example.com".to_string(),
            phone: None,
            business_line: BusinessLine::FillingStation,
            subject: Some("Fleet card".to_string()),
            message: "Do you offer fleet accounts?".to_string(),
        }
        .normalized()
        .expect("Valid message rejected");

        let created = create_message(&pool, &data)
            .await
            .expect("Failed to create message");
        assert!(!created.read);
        assert_eq!(created.business_line, BusinessLine::FillingStation);
        assert_eq!(count_unread_messages(&pool).await.expect("Failed to count"), 3);
    }

    #[sqlx::test(migrations = "./migrations", fixtures("seed"))]
    async fn test_sessions(pool: PgPool) {
        let admin = get_admin_by_session(&pool, id(SEED_LIVE_SESSION))
            .await
            .expect("Failed database query")
            .expect("Live session not resolved");
        assert_eq!(admin.id, id(SEED_ADMIN_ID));

        let expired = get_admin_by_session(&pool, id(SEED_EXPIRED_SESSION))
            .await
            .expect("Failed database query");
        assert!(expired.is_none());

        assert_eq!(purge_expired_sessions(&pool).await.expect("Failed to purge"), 1);

        let session = create_session(&pool, admin.id, Duration::hours(1))
            .await
            .expect("Failed to create session");
        assert!(get_admin_by_session(&pool, session.token)
            .await
            .expect("Failed database query")
            .is_some());

        assert!(delete_session(&pool, session.token).await.expect("Failed to delete"));
        assert!(get_admin_by_session(&pool, session.token)
            .await
            .expect("Failed database query")
            .is_none());
    }

    #[sqlx::test(migrations = "./migrations", fixtures("seed"))]
    async fn test_create_admin_duplicate(pool: PgPool) {
        assert_eq!(count_admins(&pool).await.expect("Failed to count"), 1);

        let result = create_admin(
            &pool,
            &AdminCreate {
                email: "admin@example.com".to_string(),
                password_hash: "x".to_string(),
            },
        )
        .await;
        assert!(matches!(result, Err(ResourceError::AlreadyExists { .. })));

        let fetched = get_admin_by_email(&pool, "admin@example.com")
            .await
            .expect("Failed database query");
        assert_eq!(fetched.map(|a| a.id), Some(id(SEED_ADMIN_ID)));
    }

    #[sqlx::test(migrations = "./migrations", fixtures("seed"))]
    async fn test_cms_bundle(pool: PgPool) {
        let bundle = cms_bundle(&pool, Some(BusinessLine::BikeLpg))
            .await
            .expect("Failed to load bundle");

        assert_eq!(bundle.business_line, Some(BusinessLine::BikeLpg));
        assert_eq!(bundle.products.len(), 2);
        assert_eq!(bundle.banners, vec![get_seed_banner_active()]);
        assert_eq!(bundle.videos.len(), 2);
        assert_eq!(bundle.reviews.len(), 1);
        assert!(bundle.contacts.is_empty());

        let general = cms_bundle(&pool, Some(BusinessLine::General))
            .await
            .expect("Failed to load bundle");
        assert_eq!(general.contacts, vec![get_seed_contact_office()]);
        assert_eq!(general.stats.len(), 1);
    }

    fn pin_config(max_attempts: i32) -> SecureDownloadConfig {
        SecureDownloadConfig {
            redirect_url: Some("https://files.example.com/creds.zip".to_string()),
            allowed_emails: vec!["ops@example.com".to_string()],
            pin_ttl_minutes: 10,
            pin_max_attempts: max_attempts,
        }
    }

    async fn issue_known_pin(pool: &PgPool, pin: &str, ttl: Duration) -> DownloadPin {
        let hash = PasswordManager::hash_password(pin).expect("Failed to hash pin");
        replace_pin(pool, "ops@example.com", &hash, Utc::now() + ttl)
            .await
            .expect("Failed to store pin")
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_pin_request_stores_one_live_pin(pool: PgPool) {
        let cfg = pin_config(5);
        let mailer = Mailer::Log;
        let gate = PinGate::new(&pool, &cfg, &mailer);

        gate.request("OPS@example.com").await.expect("Request failed");
        let first = get_live_pin(&pool, "ops@example.com")
            .await
            .expect("Failed database query")
            .expect("No pin stored");

        gate.request("ops@example.com").await.expect("Request failed");
        let second = get_live_pin(&pool, "ops@example.com")
            .await
            .expect("Failed database query")
            .expect("No pin stored");
        assert_ne!(first.id, second.id);

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM download_pins")
            .fetch_one(&pool)
            .await
            .expect("Failed database query");
        assert_eq!(count, 1);

        gate.request("stranger@example.com").await.expect("Request failed");
        let stranger = get_live_pin(&pool, "stranger@example.com")
            .await
            .expect("Failed database query");
        assert!(stranger.is_none());
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_pin_verify_is_single_use(pool: PgPool) {
        let cfg = pin_config(5);
        let mailer = Mailer::Log;
        let gate = PinGate::new(&pool, &cfg, &mailer);

        assert!(matches!(
            gate.verify("ops@example.com", "123456").await,
            Err(PinError::NoActivePin)
        ));

        issue_known_pin(&pool, "123456", Duration::minutes(10)).await;

        assert!(matches!(
            gate.verify("ops@example.com", "654321").await,
            Err(PinError::Mismatch)
        ));

        let url = gate
            .verify("Ops@Example.com", " 123456 ")
            .await
            .expect("Correct pin rejected");
        assert_eq!(url, "https://files.example.com/creds.zip");

        assert!(matches!(
            gate.verify("ops@example.com", "123456").await,
            Err(PinError::NoActivePin)
        ));
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_pin_attempt_limit(pool: PgPool) {
        let cfg = pin_config(2);
        let mailer = Mailer::Log;
        let gate = PinGate::new(&pool, &cfg, &mailer);

        issue_known_pin(&pool, "123456", Duration::minutes(10)).await;

        assert!(matches!(
            gate.verify("ops@example.com", "000000").await,
            Err(PinError::Mismatch)
        ));
        assert!(matches!(
            gate.verify("ops@example.com", "000001").await,
            Err(PinError::TooManyAttempts)
        ));
        // Locked even with the right PIN.
        assert!(matches!(
            gate.verify("ops@example.com", "123456").await,
            Err(PinError::TooManyAttempts)
        ));
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_pin_parallel_guesses_respect_limit(pool: PgPool) {
        let cfg = pin_config(2);
        let mailer = Mailer::Log;
        let stored = issue_known_pin(&pool, "123456", Duration::minutes(10)).await;

        let guesses = (0..8).map(|n| {
            let gate = PinGate::new(&pool, &cfg, &mailer);
            async move { gate.verify("ops@example.com", &format!("00000{n}")).await }
        });
        let results = futures_util::future::join_all(guesses).await;

        let mismatches = results
            .iter()
            .filter(|r| matches!(r, Err(PinError::Mismatch)))
            .count();
        assert!(mismatches <= 1, "{mismatches} guesses were let through");
        assert!(results
            .iter()
            .all(|r| matches!(r, Err(PinError::Mismatch | PinError::TooManyAttempts))));

        let attempts: i32 =
            sqlx::query_scalar("SELECT attempts FROM download_pins WHERE id = $1")
                .bind(stored.id)
                .fetch_one(&pool)
                .await
                .expect("Failed database query");
        assert_eq!(attempts, 2);

        let gate = PinGate::new(&pool, &cfg, &mailer);
        assert!(matches!(
            gate.verify("ops@example.com", "123456").await,
            Err(PinError::TooManyAttempts)
        ));
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_pin_expired(pool: PgPool) {
        let cfg = pin_config(5);
        let mailer = Mailer::Log;
        let gate = PinGate::new(&pool, &cfg, &mailer);

        issue_known_pin(&pool, "123456", Duration::minutes(-1)).await;

        assert!(matches!(
            gate.verify("ops@example.com", "123456").await,
            Err(PinError::Expired)
        ));
    }
}
