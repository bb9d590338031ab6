//! Example configuration written by `repo-janitor init`.

#[cfg(test)]
#[path = "example_tests.rs"]
mod tests;

/// Returns a commented example configuration exercising every setting.
pub fn example_config() -> &'static str {
    r#"repositories:
  - owner: my-org
    name: repo1
  - owner: my-org
    name: repo2

settings:
  # Merge methods
  allow_merge_commit: false
  allow_squash_merge: true
  allow_rebase_merge: true
  delete_branch_on_merge: true

  # Merge commit messages (GitHub API values)
  squash_merge_commit_title: PR_TITLE
  squash_merge_commit_message: PR_BODY
  merge_commit_title: PR_TITLE
  merge_commit_message: PR_BODY

  # Repository visibility: public or private
  visibility: public

  # Repository features
  has_issues: true
  has_projects: false
  has_wiki: false
  has_discussions: true
  archived: false

  # Additional settings
  allow_update_branch: true
  web_commit_signoff_required: false
  allow_forking: true

  # Repository metadata
  description: "A brief description of the repository"
  homepage: "https://example.com"
  topics: ["rust", "cli", "automation"]

  default_branch: "main"
  allow_auto_merge: false

  # GitHub Pages cannot be toggled through the API; differences are reported only
  github_pages:
    enabled: false

  # Branch protection (applied to all repositories)
  branch_protection:
    enabled: true
    pattern: "main"
    required_reviews: 1
    dismiss_stale_reviews: true
    require_code_owner_reviews: false
    require_status_checks: true
    require_branches_up_to_date: true
    status_check_contexts: ["ci/test"]
    include_admins: false
    require_linear_history: false
    require_signed_commits: false
    require_conversation_resolution: true
    allow_force_pushes: false
    allow_deletions: false
"#
}
