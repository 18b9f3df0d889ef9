use diesel::prelude::*;
use shared::Part;

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = crate::schema::part_inventory_app)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct PartRow {
    pub part_no: String,
    pub quant: i32,
}

impl From<PartRow> for Part {
    fn from(row: PartRow) -> Self {
        Part {
            part_no: row.part_no,
            quant: row.quant,
        }
    }
}
