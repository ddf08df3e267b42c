mod tests_symbol_table;
