diesel::table! {
    part_inventory_app (part_no) {
        part_no -> Varchar,
        quant -> Int4,
    }
}
