use tabled::Table;

use crate::utils;

pub fn languages() {
    println!("{}", Table::new(utils::language_rows()));
}
