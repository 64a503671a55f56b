mod detect_the_default_branch;
mod list_branches_and_tags;
mod show_file_at_a_revision;
