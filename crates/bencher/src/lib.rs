//! Raw request fixtures shared by the benchmarks.

#[derive(Debug, Copy, Clone)]
pub struct Fixture {
    name: &'static str,
    size: FixtureSize,
    content: &'static [u8],
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FixtureSize {
    Small,
    Large,
}

impl Fixture {
    pub const fn small(name: &'static str, content: &'static [u8]) -> Self {
        Self { name, size: FixtureSize::Small, content }
    }

    pub const fn large(name: &'static str, content: &'static [u8]) -> Self {
        Self { name, size: FixtureSize::Large, content }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn size(&self) -> FixtureSize {
        self.size
    }

    pub fn content(&self) -> &'static [u8] {
        self.content
    }

    pub fn byte_len(&self) -> u64 {
        self.content.len() as u64
    }
}

pub static GET_SMALL: Fixture = Fixture::small("get_small", include_bytes!("../resources/request/get_small.txt"));
pub static GET_LARGE: Fixture = Fixture::large("get_large", include_bytes!("../resources/request/get_large.txt"));
pub static POST_FORM: Fixture = Fixture::small("post_form", include_bytes!("../resources/request/post_form.txt"));

pub fn request_fixtures() -> [Fixture; 3] {
    [GET_SMALL, GET_LARGE, POST_FORM]
}
