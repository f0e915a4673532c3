use crate::{
    data::student::{StudentId, StudentStatus},
    error::{CannotBeABaseSnafu, ParseUrlSnafu, RegistrarResult},
};
use snafu::{ResultExt, ensure};
use url::Url;

/// Every backend URL the console knows about, built off one base.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Endpoints {
    base: Url,
}

impl Endpoints {
    pub fn new(base: &str) -> RegistrarResult<Self> {
        let mut url = Url::parse(base.trim()).context(ParseUrlSnafu { original: base })?;
        ensure!(
            !url.cannot_be_a_base(),
            CannotBeABaseSnafu { original: base }
        );

        let trimmed = url.path().trim_end_matches('/').to_string();
        url.set_path(&trimmed);

        Ok(Self { base: url })
    }

    pub const fn base(&self) -> &Url {
        &self.base
    }

    fn at(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        //can't fail, `new` already checked we can be a base
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    pub fn students(&self) -> Url {
        self.at(&["students"])
    }

    pub fn student(&self, id: StudentId) -> Url {
        self.at(&["students", &id.to_string()])
    }

    pub fn search(&self, keyword: &str) -> Url {
        let mut url = self.at(&["students", "search"]);
        url.query_pairs_mut().append_pair("keyword", keyword);
        url
    }

    pub fn by_status(&self, status: StudentStatus) -> Url {
        self.at(&["students", "status", status.as_str()])
    }

    pub fn by_course(&self, course: &str) -> Url {
        self.at(&["students", "course", course])
    }

    pub fn by_year(&self, year: u32) -> Url {
        self.at(&["students", "year", &year.to_string()])
    }

    pub fn stats(&self) -> Url {
        self.at(&["students", "stats"])
    }
}
