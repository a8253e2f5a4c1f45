// Transaction integration tests


pub fn address(c: char) -> String {
    std::iter::repeat(c).take(tanglemesh::transaction::ADDRESS_LENGTH).collect()
}
