diesel::table! {
    users (id) {
        id -> Integer,
        email -> Text,
        name -> Text,
        role -> Text,
        status -> Text,
        created_at -> Timestamp,
    }
}

diesel::table! {
    requirements (id) {
        id -> Integer,
        title -> Text,
        topic -> Text,
        submissions_count -> Integer,
    }
}

diesel::table! {
    submissions (id) {
        id -> Integer,
        requirement_id -> Integer,
        kind -> Text,
        title -> Text,
        abstract_text -> Text,
        author_user_id -> Integer,
        author_name -> Text,
        author_email -> Text,
        file_url -> Nullable<Text>,
        file_name -> Nullable<Text>,
        file_type -> Nullable<Text>,
        file_size -> Nullable<Integer>,
        status -> Text,
        admin_remarks -> Text,
        editor_remarks -> Text,
        reviewed_by -> Nullable<Integer>,
        reviewed_at -> Nullable<Timestamp>,
        editor_reviewed_at -> Nullable<Timestamp>,
        assigned_editor -> Nullable<Integer>,
        assigned_by -> Nullable<Integer>,
        assigned_at -> Nullable<Timestamp>,
        submitted_at -> Timestamp,
    }
}

diesel::table! {
    role_requests (id) {
        id -> Integer,
        user_id -> Integer,
        requested_role -> Text,
        reason -> Text,
        status -> Text,
        reviewed_by -> Nullable<Integer>,
        reviewed_at -> Nullable<Timestamp>,
        admin_notes -> Nullable<Text>,
        created_at -> Timestamp,
    }
}

diesel::table! {
    articles (id) {
        id -> Integer,
        author_id -> Integer,
        title -> Text,
        excerpt -> Text,
        content -> Text,
        category -> Text,
        status -> Text,
        approval_status -> Text,
        is_published -> Bool,
        published_at -> Nullable<Timestamp>,
        reviewed_by -> Nullable<Integer>,
        reviewed_at -> Nullable<Timestamp>,
        rejection_reason -> Nullable<Text>,
        modification_notes -> Nullable<Text>,
        created_at -> Timestamp,
        updated_at -> Timestamp,
    }
}

diesel::allow_tables_to_appear_in_same_query!(users, requirements, submissions, role_requests, articles);
