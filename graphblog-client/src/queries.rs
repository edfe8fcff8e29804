//! GraphQL documents sent by `BlogClient`.

macro_rules! post_fields {
    () => {
        "_id title content imageUrl creator { _id name } createdAt updatedAt"
    };
}

pub(crate) const CREATE_USER: &str = "mutation CreateUser($input: UserInputData!) { createUser(userInput: $input) { _id name email status } }";

pub(crate) const LOGIN: &str = "query Login($email: String!, $password: String!) { login(email: $email, password: $password) { token userId } }";

pub(crate) const CREATE_POST: &str = concat!(
    "mutation CreatePost($input: PostInputData!) { createPost(postInput: $input) { ",
    post_fields!(),
    " } }"
);

pub(crate) const UPDATE_POST: &str = concat!(
    "mutation UpdatePost($id: ID!, $input: PostInputData!) { updatePost(id: $id, postInput: $input) { ",
    post_fields!(),
    " } }"
);

pub(crate) const DELETE_POST: &str =
    "mutation DeletePost($id: ID!) { deletePost(id: $id) { message } }";

pub(crate) const GET_POSTS: &str = concat!(
    "query GetPosts($page: Int!) { getPosts(page: $page) { totalPosts post { ",
    post_fields!(),
    " } } }"
);

pub(crate) const GET_POST: &str = concat!(
    "query GetPost($id: ID!) { getPost(postId: $id) { post { ",
    post_fields!(),
    " } } }"
);
