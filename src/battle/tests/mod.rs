mod common;




#[cfg(test)]
mod test_fainting;
