// Mirrors the DDL in `initializer.rs`. SQLite stores every INTEGER as 64-bit,
// so both `id` and `quantity` map to BigInt.
diesel::table! {
    orders (id) {
        id -> BigInt,
        symbol -> Text,
        price -> Double,
        quantity -> BigInt,
        order_type -> Text,
    }
}
