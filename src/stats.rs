//! Aggregates over a list of posts.
//!
//! All functions are pure and total. Ties are broken in favour of whatever
//! was seen first while scanning the list from left to right.

use std::collections::HashMap;

use schemars::JsonSchema;
use serde::Serialize;

use crate::model::Post;

/// Anything that can be summarised like a post.
pub trait Entry {
	fn title(&self) -> &str;
	fn author(&self) -> &str;
	fn likes(&self) -> i64;
}

impl Entry for Post {
	fn title(&self) -> &str {
		&self.title
	}

	fn author(&self) -> &str {
		&self.author
	}

	fn likes(&self) -> i64 {
		self.likes
	}
}

/// The most liked post, stripped down to its title, author and likes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
pub struct Favorite {
	pub title: String,
	pub author: String,
	pub likes: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
pub struct AuthorPosts {
	pub author: String,
	pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
pub struct AuthorLikes {
	pub author: String,
	pub likes: i64,
}

/// All aggregates at once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
pub struct Summary {
	pub total_likes: i64,
	pub favorite_post: Option<Favorite>,
	pub most_prolific_author: Option<AuthorPosts>,
	pub most_liked_author: Option<AuthorLikes>,
}

impl Summary {
	pub fn of<P: Entry>(posts: &[P]) -> Self {
		Self {
			total_likes: total_likes(posts),
			favorite_post: favorite_post(posts),
			most_prolific_author: most_prolific_author(posts),
			most_liked_author: most_liked_author(posts),
		}
	}
}

/// Saturates at `i64::MAX` instead of overflowing.
pub fn total_likes<P: Entry>(posts: &[P]) -> i64 {
	posts.iter().map(Entry::likes).fold(0, i64::saturating_add)
}

pub fn favorite_post<P: Entry>(posts: &[P]) -> Option<Favorite> {
	let favorite = posts
		.iter()
		.reduce(|best, post| if post.likes() > best.likes() { post } else { best })?;

	Some(Favorite {
		title: favorite.title().to_string(),
		author: favorite.author().to_string(),
		likes: favorite.likes(),
	})
}

pub fn most_prolific_author<P: Entry>(posts: &[P]) -> Option<AuthorPosts> {
	let (author, count) = running_max(posts, |_| 1)?;

	Some(AuthorPosts {
		author: author.to_string(),
		count: count.unsigned_abs(),
	})
}

pub fn most_liked_author<P: Entry>(posts: &[P]) -> Option<AuthorLikes> {
	let (author, likes) = running_max(posts, Entry::likes)?;

	Some(AuthorLikes {
		author: author.to_string(),
		likes,
	})
}

/// Accumulates `weight` per author, returning the author whose running total
/// was the first to reach the final maximum.
///
/// Weights are never negative, so the largest running total is also the
/// largest final total. Totals saturate at `i64::MAX`.
fn running_max<P: Entry>(posts: &[P], weight: impl Fn(&P) -> i64) -> Option<(&str, i64)> {
	let mut totals = HashMap::<&str, i64>::new();
	let mut best: Option<(&str, i64)> = None;

	for post in posts {
		let total = totals.entry(post.author()).or_default();
		*total = (*total).saturating_add(weight(post));

		if best.map_or(true, |(_, max)| *total > max) {
			best = Some((post.author(), *total));
		}
	}

	best
}

#[cfg(test)]
mod test {
	use super::*;

	struct Blog(&'static str, &'static str, i64);

	impl Entry for Blog {
		fn title(&self) -> &str {
			self.0
		}

		fn author(&self) -> &str {
			self.1
		}

		fn likes(&self) -> i64 {
			self.2
		}
	}

	fn blogs() -> Vec<Blog> {
		vec![
			Blog("React patterns", "Michael Chan", 7),
			Blog("Go To Statement Considered Harmful", "Edsger W. Dijkstra", 5),
			Blog("Canonical string reduction", "Edsger W. Dijkstra", 12),
			Blog("First class tests", "Robert C. Martin", 10),
			Blog("TDD harms architecture", "Robert C. Martin", 0),
			Blog("Type wars", "Robert C. Martin", 2),
		]
	}

	#[test]
	fn test_total_likes() {
		assert_eq!(total_likes::<Blog>(&[]), 0);
		assert_eq!(total_likes(&[Blog("React patterns", "Michael Chan", 7)]), 7);
		assert_eq!(total_likes(&blogs()), 36);

		let mut reversed = blogs();
		reversed.reverse();

		assert_eq!(total_likes(&reversed), 36);
	}

	#[test]
	fn test_favorite_post() {
		assert_eq!(favorite_post::<Blog>(&[]), None);
		assert_eq!(
			favorite_post(&blogs()),
			Some(Favorite {
				title: "Canonical string reduction".into(),
				author: "Edsger W. Dijkstra".into(),
				likes: 12,
			})
		);
	}

	#[test]
	fn test_favorite_post_tie() {
		let blogs = [Blog("first", "a", 3), Blog("second", "b", 3)];

		assert_eq!(favorite_post(&blogs).unwrap().title, "first");
	}

	#[test]
	fn test_most_prolific_author() {
		assert_eq!(most_prolific_author::<Blog>(&[]), None);
		assert_eq!(
			most_prolific_author(&blogs()),
			Some(AuthorPosts {
				author: "Robert C. Martin".into(),
				count: 3,
			})
		);
	}

	#[test]
	fn test_most_prolific_author_tie() {
		// both reach two posts, but "a" gets there first
		let blogs = [
			Blog("1", "b", 0),
			Blog("2", "a", 0),
			Blog("3", "a", 0),
			Blog("4", "b", 0),
		];

		assert_eq!(most_prolific_author(&blogs).unwrap().author, "a");
	}

	#[test]
	fn test_most_liked_author() {
		assert_eq!(most_liked_author::<Blog>(&[]), None);
		assert_eq!(
			most_liked_author(&blogs()),
			Some(AuthorLikes {
				author: "Edsger W. Dijkstra".into(),
				likes: 17,
			})
		);
	}

	#[test]
	fn test_most_liked_author_without_likes() {
		let blogs = [Blog("1", "a", 0), Blog("2", "b", 0)];

		assert_eq!(
			most_liked_author(&blogs),
			Some(AuthorLikes {
				author: "a".into(),
				likes: 0,
			})
		);
	}

	#[test]
	fn test_totals_saturate() {
		let blogs = [
			Blog("1", "a", i64::MAX),
			Blog("2", "a", i64::MAX),
			Blog("3", "b", 1),
		];

		assert_eq!(total_likes(&blogs), i64::MAX);
		assert_eq!(
			most_liked_author(&blogs),
			Some(AuthorLikes {
				author: "a".into(),
				likes: i64::MAX,
			})
		);
	}

	#[test]
	fn test_summary() {
		let summary = Summary::of(&blogs());

		assert_eq!(summary.total_likes, 36);
		assert_eq!(summary.favorite_post.unwrap().likes, 12);
		assert_eq!(summary.most_prolific_author.unwrap().count, 3);
		assert_eq!(summary.most_liked_author.unwrap().likes, 17);
	}
}
