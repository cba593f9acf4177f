#[cfg(test)]
mod extractor_tests;
