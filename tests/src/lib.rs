#[cfg(test)]
mod fixtures;
#[cfg(test)]
mod host_table;
